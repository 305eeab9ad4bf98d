//! Test fixtures and helpers.
//!
//! The centerpiece is [`FlakyChannel`], a transport wrapper that applies
//! a scripted fate to each outbound frame, simulating the drop and
//! duplication behavior the protocol must tolerate.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use tandem::{host_with_config, join_with_config, Session, SyncConfig};
use tandem_sync::{ChannelEvent, MemoryHub, Result, TransportChannel};

/// What happens to one outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFate {
    /// Hand the frame to the transport normally.
    Deliver,
    /// Silently discard the frame, reporting success to the sender.
    Drop,
    /// Send the frame twice.
    Duplicate,
}

/// A channel wrapper applying a scripted [`FrameFate`] to each
/// successive outbound frame. Frames beyond the script are delivered
/// normally. Inbound events pass through untouched.
pub struct FlakyChannel<C> {
    inner: C,
    script: Mutex<VecDeque<FrameFate>>,
}

impl<C: TransportChannel> FlakyChannel<C> {
    /// Wrap a channel with a frame-fate script.
    pub fn new(inner: C, script: impl IntoIterator<Item = FrameFate>) -> Self {
        Self {
            inner,
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl<C: TransportChannel> TransportChannel for FlakyChannel<C> {
    fn send(&self, frame: Bytes) -> Result<()> {
        let fate = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FrameFate::Deliver);

        match fate {
            FrameFate::Deliver => self.inner.send(frame),
            FrameFate::Drop => Ok(()),
            FrameFate::Duplicate => {
                self.inner.send(frame.clone())?;
                self.inner.send(frame)
            }
        }
    }

    async fn next_event(&self) -> Option<ChannelEvent> {
        self.inner.next_event().await
    }
}

/// A connected host/join session pair over a fresh in-memory hub, with
/// a short broadcast interval suitable for tests.
pub async fn session_pair(hub: &MemoryHub, broadcast_interval: Duration) -> (Session, Session) {
    let config = SyncConfig { broadcast_interval };

    let (address, pending) = host_with_config(hub, "tandem://test", config.clone())
        .await
        .expect("bind failed");
    tokio::try_join!(
        pending.established(),
        join_with_config(hub, &address, config)
    )
    .expect("session establishment failed")
}

/// Initialize test logging once; respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_sync::MemoryChannel;

    #[tokio::test]
    async fn test_flaky_channel_drops_scripted_frames() {
        let (a, b) = MemoryChannel::pair();
        let flaky = FlakyChannel::new(a, [FrameFate::Drop, FrameFate::Deliver]);

        flaky.send(Bytes::from_static(b"lost")).unwrap();
        flaky.send(Bytes::from_static(b"kept")).unwrap();

        assert!(matches!(b.next_event().await, Some(ChannelEvent::Open)));
        match b.next_event().await {
            Some(ChannelEvent::Data(frame)) => assert_eq!(&frame[..], b"kept"),
            other => panic!("expected the kept frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_flaky_channel_duplicates_scripted_frames() {
        let (a, b) = MemoryChannel::pair();
        let flaky = FlakyChannel::new(a, [FrameFate::Duplicate]);

        flaky.send(Bytes::from_static(b"twice")).unwrap();

        assert!(matches!(b.next_event().await, Some(ChannelEvent::Open)));
        for _ in 0..2 {
            match b.next_event().await {
                Some(ChannelEvent::Data(frame)) => assert_eq!(&frame[..], b"twice"),
                other => panic!("expected duplicated frame, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_flaky_channel_defaults_to_deliver() {
        let (a, b) = MemoryChannel::pair();
        let flaky = FlakyChannel::new(a, []);

        flaky.send(Bytes::from_static(b"plain")).unwrap();

        assert!(matches!(b.next_event().await, Some(ChannelEvent::Open)));
        assert!(matches!(b.next_event().await, Some(ChannelEvent::Data(_))));
    }
}
