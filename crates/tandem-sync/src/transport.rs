//! Transport abstraction for the sync protocol.
//!
//! A [`TransportChannel`] is a single established peer connection: a
//! non-blocking byte send plus a stream of lifecycle and data events. The
//! channel is assumed unreliable and unordered; frames may be dropped,
//! duplicated, or reordered in transit. All reliability is built above it.
//!
//! A [`Connector`] covers connection setup: the host binds its session id
//! and accepts one inbound connection, the joiner dials the host's id.
//! Address discovery, NAT traversal, and encryption belong to the
//! transport implementation, not to this crate.

use async_trait::async_trait;
use bytes::Bytes;

use tandem_core::SessionId;

use crate::error::{Result, SyncError};

/// Lifecycle and data events raised by a channel.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// The connection is established; data may now flow.
    Open,
    /// An inbound frame. May be duplicated, reordered, or missing
    /// relative to what the peer sent.
    Data(Bytes),
    /// The connection ended cleanly.
    Closed,
    /// The connection failed.
    Failed(String),
}

/// A single established, bidirectional byte channel to the peer.
#[async_trait]
pub trait TransportChannel: Send + Sync {
    /// Send a frame, best-effort and non-blocking.
    ///
    /// No delivery guarantee: a returned `Ok` means the frame was handed
    /// to the transport, nothing more.
    fn send(&self, frame: Bytes) -> Result<()>;

    /// Wait for the next channel event.
    ///
    /// Returns `None` once the channel is gone, equivalent to
    /// [`ChannelEvent::Closed`].
    async fn next_event(&self) -> Option<ChannelEvent>;
}

/// A pending inbound connection on a bound session id.
#[async_trait]
pub trait Incoming: Send {
    /// The channel type produced on accept.
    type Channel: TransportChannel + Send + 'static;

    /// Resolve on the first successful inbound connection.
    async fn accept(self) -> Result<Self::Channel>;
}

/// Connection setup: bind-and-accept for the host, dial for the joiner.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The channel type this connector produces.
    type Channel: TransportChannel + Send + 'static;
    /// The pending-accept handle returned by [`Connector::bind`].
    type Incoming: Incoming<Channel = Self::Channel> + Send;

    /// Register `local` as reachable and return a pending-accept handle.
    async fn bind(&self, local: SessionId) -> Result<Self::Incoming>;

    /// Dial the peer registered under `target`, identifying as `local`.
    async fn connect(&self, local: SessionId, target: SessionId) -> Result<Self::Channel>;
}

/// An in-memory transport for tests and single-process demos.
///
/// Channels are pairs of unbounded queues; an endpoint drop surfaces as
/// a closed channel on the peer.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::{mpsc, oneshot, RwLock};

    /// Rendezvous point wiring hosts and joiners together by session id.
    pub struct MemoryHub {
        listeners: RwLock<HashMap<SessionId, oneshot::Sender<MemoryChannel>>>,
    }

    impl MemoryHub {
        /// Create an empty hub.
        pub fn new() -> Self {
            Self {
                listeners: RwLock::new(HashMap::new()),
            }
        }
    }

    impl Default for MemoryHub {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Connector for MemoryHub {
        type Channel = MemoryChannel;
        type Incoming = MemoryListener;

        async fn bind(&self, local: SessionId) -> Result<MemoryListener> {
            let mut listeners = self.listeners.write().await;
            if listeners.contains_key(&local) {
                return Err(SyncError::Transport(format!(
                    "session id already bound: {local}"
                )));
            }

            let (tx, rx) = oneshot::channel();
            listeners.insert(local, tx);
            Ok(MemoryListener { rx })
        }

        async fn connect(&self, _local: SessionId, target: SessionId) -> Result<MemoryChannel> {
            // One connection per bind: the listener slot is consumed here.
            let slot = self
                .listeners
                .write()
                .await
                .remove(&target)
                .ok_or_else(|| SyncError::PeerNotReachable(target.to_string()))?;

            let (ours, theirs) = MemoryChannel::pair();
            slot.send(theirs)
                .map_err(|_| SyncError::PeerNotReachable(target.to_string()))?;
            Ok(ours)
        }
    }

    /// A bound session id waiting for its first inbound connection.
    pub struct MemoryListener {
        rx: oneshot::Receiver<MemoryChannel>,
    }

    #[async_trait]
    impl Incoming for MemoryListener {
        type Channel = MemoryChannel;

        async fn accept(self) -> Result<MemoryChannel> {
            self.rx.await.map_err(|_| SyncError::ChannelClosed)
        }
    }

    /// One endpoint of an in-memory channel pair.
    #[derive(Debug)]
    pub struct MemoryChannel {
        peer_tx: mpsc::UnboundedSender<ChannelEvent>,
        events: RwLock<mpsc::UnboundedReceiver<ChannelEvent>>,
    }

    impl MemoryChannel {
        /// Create a cross-wired pair, each side with `Open` already queued.
        pub fn pair() -> (Self, Self) {
            let (a_tx, a_rx) = mpsc::unbounded_channel();
            let (b_tx, b_rx) = mpsc::unbounded_channel();

            let _ = a_tx.send(ChannelEvent::Open);
            let _ = b_tx.send(ChannelEvent::Open);

            let a = Self {
                peer_tx: b_tx,
                events: RwLock::new(a_rx),
            };
            let b = Self {
                peer_tx: a_tx,
                events: RwLock::new(b_rx),
            };
            (a, b)
        }
    }

    #[async_trait]
    impl TransportChannel for MemoryChannel {
        fn send(&self, frame: Bytes) -> Result<()> {
            self.peer_tx
                .send(ChannelEvent::Data(frame))
                .map_err(|_| SyncError::ChannelClosed)
        }

        async fn next_event(&self) -> Option<ChannelEvent> {
            self.events.write().await.recv().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryChannel, MemoryHub};
    use super::*;

    #[tokio::test]
    async fn test_pair_opens_then_carries_data() {
        let (a, b) = MemoryChannel::pair();

        assert!(matches!(a.next_event().await, Some(ChannelEvent::Open)));
        assert!(matches!(b.next_event().await, Some(ChannelEvent::Open)));

        a.send(Bytes::from_static(b"ping")).unwrap();
        match b.next_event().await {
            Some(ChannelEvent::Data(frame)) => assert_eq!(&frame[..], b"ping"),
            other => panic!("expected data, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_endpoint_drop_closes_peer() {
        let (a, b) = MemoryChannel::pair();
        drop(a);

        // Queued events drain first, then the channel reads as closed.
        assert!(matches!(b.next_event().await, Some(ChannelEvent::Open)));
        assert!(b.next_event().await.is_none());
        assert!(matches!(
            b.send(Bytes::from_static(b"x")),
            Err(SyncError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_hub_bind_connect_accept() {
        let hub = MemoryHub::new();
        let host = SessionId::from_raw(1);
        let join = SessionId::from_raw(2);

        let listener = hub.bind(host).await.unwrap();
        let joiner_side = hub.connect(join, host).await.unwrap();
        let host_side = listener.accept().await.unwrap();

        assert!(matches!(host_side.next_event().await, Some(ChannelEvent::Open)));
        assert!(matches!(joiner_side.next_event().await, Some(ChannelEvent::Open)));

        joiner_side.send(Bytes::from_static(b"hi")).unwrap();
        assert!(matches!(
            host_side.next_event().await,
            Some(ChannelEvent::Data(_))
        ));
    }

    #[tokio::test]
    async fn test_hub_connect_unknown_id_fails() {
        let hub = MemoryHub::new();
        let err = hub
            .connect(SessionId::from_raw(2), SessionId::from_raw(99))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::PeerNotReachable(_)));
    }

    #[tokio::test]
    async fn test_hub_rejects_double_bind() {
        let hub = MemoryHub::new();
        let id = SessionId::from_raw(1);

        let _listener = hub.bind(id).await.unwrap();
        assert!(hub.bind(id).await.is_err());
    }
}
