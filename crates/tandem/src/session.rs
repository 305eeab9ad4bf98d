//! Session negotiation and lifecycle.
//!
//! Two roles: the host binds its session id and publishes a join
//! address; the joiner parses the id out of the address and dials it.
//! Once the channel opens, each side appends a `READY` action to its log
//! before any application traffic and starts the sync engine, so the
//! peer's identity is the first thing delivered on either side.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tandem_core::{Action, JoinAddress, OutgoingLog, Role, SessionId};
use tandem_sync::{
    ChannelEvent, Connector, DeltaSyncEngine, Incoming, SyncConfig, TransportChannel,
};

use crate::bridge::{ApplicationBridge, SessionEvent};
use crate::error::{Result, SessionError};

/// Enter the Host role: bind a fresh session id and return the
/// shareable join address along with a handle awaiting the first
/// inbound connection.
///
/// The address is available immediately so it can be published before
/// any joiner exists; the session itself resolves from
/// [`PendingSession::established`] once a peer connects. No timeout is
/// applied; resolution follows the transport's own signals.
pub async fn host<C: Connector>(
    connector: &C,
    base: &str,
) -> Result<(JoinAddress, PendingSession<C>)> {
    host_with_config(connector, base, SyncConfig::default()).await
}

/// [`host`] with explicit sync configuration.
pub async fn host_with_config<C: Connector>(
    connector: &C,
    base: &str,
    config: SyncConfig,
) -> Result<(JoinAddress, PendingSession<C>)> {
    let local_id = SessionId::generate();
    let incoming = connector
        .bind(local_id)
        .await
        .map_err(|e| SessionError::Negotiation(e.to_string()))?;

    let address = JoinAddress::new(base, local_id);
    tracing::info!(%address, "hosting session");

    Ok((
        address.clone(),
        PendingSession {
            local_id,
            address,
            incoming,
            config,
        },
    ))
}

/// Enter the Join role: dial the session id embedded in `address`.
pub async fn join<C: Connector>(connector: &C, address: &JoinAddress) -> Result<Session> {
    join_with_config(connector, address, SyncConfig::default()).await
}

/// [`join`] with explicit sync configuration.
pub async fn join_with_config<C: Connector>(
    connector: &C,
    address: &JoinAddress,
    config: SyncConfig,
) -> Result<Session> {
    let local_id = SessionId::generate();
    tracing::info!(%address, id = %local_id, "joining session");

    let channel = connector
        .connect(local_id, address.host_id())
        .await
        .map_err(|e| SessionError::Negotiation(e.to_string()))?;

    establish(local_id, Role::Join, channel, None, config).await
}

/// A bound host waiting for its first inbound connection.
pub struct PendingSession<C: Connector> {
    local_id: SessionId,
    address: JoinAddress,
    incoming: C::Incoming,
    config: SyncConfig,
}

impl<C: Connector> PendingSession<C> {
    /// The address a joiner needs.
    pub fn address(&self) -> &JoinAddress {
        &self.address
    }

    /// Resolve on the first successful inbound connection.
    pub async fn established(self) -> Result<Session> {
        let channel = self
            .incoming
            .accept()
            .await
            .map_err(|e| SessionError::Negotiation(e.to_string()))?;

        establish(
            self.local_id,
            Role::Host,
            channel,
            Some(self.address),
            self.config,
        )
        .await
    }
}

/// One side of an established session.
///
/// Owns the engine task; dropping the session (or calling
/// [`Session::close`]) cancels the broadcast timer and closes the
/// connection. Actions sent after that point stay in the log but are
/// never transmitted.
#[derive(Debug)]
pub struct Session {
    local_id: SessionId,
    role: Role,
    bridge: ApplicationBridge,
    engine_task: JoinHandle<()>,
}

impl Session {
    /// This peer's identity for the session's lifetime.
    pub fn local_id(&self) -> SessionId {
        self.local_id
    }

    /// Which side of the session this peer is.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Append an action for the peer. Fire-and-forget.
    pub fn send(&self, action: Action) {
        self.bridge.send(action);
    }

    /// Wait for the next session event.
    pub async fn next_event(&mut self) -> SessionEvent {
        self.bridge.next_event().await
    }

    /// The underlying bridge, for callers that want to hold it directly.
    pub fn bridge_mut(&mut self) -> &mut ApplicationBridge {
        &mut self.bridge
    }

    /// Tear the session down explicitly.
    pub fn close(&self) {
        self.engine_task.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.engine_task.abort();
    }
}

/// Common establishment path for both roles.
async fn establish<C>(
    local_id: SessionId,
    role: Role,
    channel: C,
    host_url: Option<JoinAddress>,
    config: SyncConfig,
) -> Result<Session>
where
    C: TransportChannel + Send + 'static,
{
    // Wait for the transport's Open signal before any traffic.
    loop {
        match channel.next_event().await {
            Some(ChannelEvent::Open) => break,
            // A frame before Open carries a snapshot that will be
            // rebroadcast next tick anyway; dropping it is harmless.
            Some(ChannelEvent::Data(_)) => {
                tracing::debug!("frame before open, ignoring");
            }
            Some(ChannelEvent::Closed) | None => {
                return Err(SessionError::Negotiation(
                    "channel closed before open".to_string(),
                ));
            }
            Some(ChannelEvent::Failed(reason)) => {
                return Err(SessionError::Negotiation(reason));
            }
        }
    }

    let log = Arc::new(OutgoingLog::new());
    // Handshake leads the log, ahead of any application traffic.
    log.append(Action::ready(local_id));

    let (actions_tx, actions_rx) = mpsc::unbounded_channel();
    let (control_tx, control_rx) = mpsc::unbounded_channel();

    let engine = DeltaSyncEngine::new(channel, local_id, Arc::clone(&log), actions_tx, config);
    let engine_task = tokio::spawn(async move {
        let event = match engine.run().await {
            Ok(()) => SessionEvent::Closed,
            Err(e) => {
                tracing::error!(id = %local_id, "session fault: {e}");
                SessionEvent::Fault(e.into())
            }
        };
        let _ = control_tx.send(event);
    });

    let local_events = host_url
        .into_iter()
        .map(SessionEvent::HostUrl)
        .collect::<Vec<_>>();

    tracing::debug!(id = %local_id, ?role, "session established");
    Ok(Session {
        local_id,
        role,
        bridge: ApplicationBridge::new(log, actions_rx, control_rx, local_events),
        engine_task,
    })
}
