//! The outgoing log: an append-only record of local actions.
//!
//! Owned exclusively by the local session. Grows monotonically; entries
//! are never reordered, truncated, or mutated in place. The sync engine
//! serializes the whole log on every broadcast tick, so the log itself
//! is the retransmission buffer.

use std::sync::RwLock;

use crate::action::Action;

/// Append-only, ordered sequence of local [`Action`]s.
///
/// Thread-safe via RwLock; appends and snapshots are short critical
/// sections and never suspend.
#[derive(Debug)]
pub struct OutgoingLog {
    entries: RwLock<Vec<Action>>,
}

impl OutgoingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append an action to the tail.
    ///
    /// O(1), non-blocking, fire-and-forget: delivery to the peer is not
    /// observable from this call.
    pub fn append(&self, action: Action) {
        self.entries.write().unwrap().push(action);
    }

    /// The full ordered sequence of all actions appended so far.
    pub fn snapshot(&self) -> Vec<Action> {
        self.entries.read().unwrap().clone()
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OutgoingLog {
    fn default() -> Self {
        Self::new()
    }
}
