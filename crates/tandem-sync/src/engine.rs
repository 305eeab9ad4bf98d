//! The delta-sync engine: reliability through repeated full-history
//! broadcast with receive-side diffing.
//!
//! On a fixed timer the engine serializes the entire outgoing log and
//! sends it; on receipt of a peer snapshot it delivers only the entries
//! beyond its [`PeerCursor`], in order, exactly once. There are no acks
//! and no per-message retries: a dropped frame is healed by the next
//! tick, which carries the complete history again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use tandem_core::{Action, OutgoingLog, SessionId};

use crate::cursor::PeerCursor;
use crate::error::{Result, SyncError};
use crate::transport::{ChannelEvent, TransportChannel};
use crate::wire::Snapshot;

/// Configuration for sync behavior.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How often the full outgoing log is rebroadcast.
    pub broadcast_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            broadcast_interval: Duration::from_millis(100),
        }
    }
}

/// State machine over `{PeerCursor, connection state}` driving one side
/// of a session.
///
/// Runs until the channel closes (clean stop), the application drops its
/// delivery receiver (clean stop), or a protocol violation / transport
/// failure occurs (error).
pub struct DeltaSyncEngine<C: TransportChannel> {
    channel: C,
    local_id: SessionId,
    log: Arc<OutgoingLog>,
    cursor: PeerCursor,
    delivery: mpsc::UnboundedSender<Action>,
    config: SyncConfig,
}

impl<C: TransportChannel> DeltaSyncEngine<C> {
    /// Create an engine over an established channel.
    pub fn new(
        channel: C,
        local_id: SessionId,
        log: Arc<OutgoingLog>,
        delivery: mpsc::UnboundedSender<Action>,
        config: SyncConfig,
    ) -> Self {
        Self {
            channel,
            local_id,
            log,
            cursor: PeerCursor::new(),
            delivery,
            config,
        }
    }

    /// How many remote entries have been delivered so far.
    pub fn delivered(&self) -> u64 {
        self.cursor.position()
    }

    /// Drive broadcasts and deliveries until the session ends.
    ///
    /// The first broadcast happens immediately, so the peer sees our log
    /// (and the handshake entry at its head) within one interval of the
    /// connection opening.
    pub async fn run(mut self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.broadcast_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.broadcast_tick(),
                event = self.channel.next_event() => match event {
                    Some(ChannelEvent::Data(frame)) => {
                        if !self.on_frame(&frame)? {
                            // Application dropped its receiver.
                            return Ok(());
                        }
                    }
                    // The channel was established before the engine
                    // started; a queued Open carries no information.
                    Some(ChannelEvent::Open) => {}
                    Some(ChannelEvent::Closed) | None => {
                        tracing::debug!(id = %self.local_id, "channel closed, engine stopping");
                        return Ok(());
                    }
                    Some(ChannelEvent::Failed(reason)) => {
                        return Err(SyncError::Transport(reason));
                    }
                },
            }
        }
    }

    /// Send the entire outgoing log as one snapshot frame.
    ///
    /// Send failures are logged and swallowed: the next tick is an
    /// implicit retransmission of everything.
    fn broadcast_tick(&self) {
        let snapshot = Snapshot::new(self.local_id, self.log.snapshot());
        let entries = snapshot.len();

        let frame = match snapshot.encode() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("snapshot encode failed: {e}");
                return;
            }
        };

        match self.channel.send(frame) {
            Ok(()) => tracing::trace!(entries, "broadcast tick"),
            Err(e) => tracing::warn!(entries, "broadcast tick dropped: {e}"),
        }
    }

    /// Decode and apply one inbound frame.
    fn on_frame(&mut self, frame: &[u8]) -> Result<bool> {
        let snapshot = Snapshot::decode(frame)?;
        self.apply_snapshot(snapshot)
    }

    /// Diff a peer snapshot against the cursor and deliver what is new.
    ///
    /// Returns `Ok(false)` if the application is no longer listening.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> Result<bool> {
        let fresh = self.cursor.advance(snapshot.len())?;
        if fresh.is_empty() {
            tracing::trace!(peer = %snapshot.sender, "redundant snapshot, nothing new");
            return Ok(true);
        }

        tracing::debug!(
            peer = %snapshot.sender,
            from = fresh.start,
            to = fresh.end,
            "delivering new entries"
        );
        for action in &snapshot.actions[fresh.start as usize..fresh.end as usize] {
            if self.delivery.send(action.clone()).is_err() {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
