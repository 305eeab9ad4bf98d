//! The peer cursor: how much of the remote log has been delivered.
//!
//! Every received snapshot is interpreted as a prefix-extension of
//! everything previously seen, never as positional insertion or
//! replacement. The cursor is the single piece of receive-side state;
//! it only ever increases.

use std::ops::Range;

use crate::error::{Result, SyncError};

/// Count of remote-log entries already delivered to the application.
///
/// Owned exclusively by the sync engine. Monotonically non-decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerCursor {
    delivered: u64,
}

impl PeerCursor {
    /// A cursor at the start of the remote log.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many remote entries have been delivered so far.
    pub fn position(&self) -> u64 {
        self.delivered
    }

    /// Account for a received snapshot of `snapshot_len` entries.
    ///
    /// Returns the index range of newly deliverable entries: empty when
    /// the snapshot is a duplicate of what was already seen (the common
    /// steady-state case), `[old, snapshot_len)` when the peer's log has
    /// grown. A snapshot shorter than what was previously observed is a
    /// protocol violation; the cursor is left untouched.
    pub fn advance(&mut self, snapshot_len: u64) -> Result<Range<u64>> {
        if snapshot_len < self.delivered {
            return Err(SyncError::SnapshotRewind {
                seen: self.delivered,
                received: snapshot_len,
            });
        }

        let fresh = self.delivered..snapshot_len;
        self.delivered = snapshot_len;
        Ok(fresh)
    }
}
