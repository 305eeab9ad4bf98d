//! # Tandem Sync
//!
//! The sync protocol for two-peer tandem sessions: ordered, exactly-once
//! delivery over an unreliable, unordered byte channel.
//!
//! ## How it works
//!
//! Reliability comes from **repeated full-history broadcast with
//! receive-side diffing**, not from acknowledgments:
//!
//! - On a fixed timer, each peer serializes its entire outgoing log and
//!   sends it as one [`Snapshot`] frame.
//! - On receipt, the [`DeltaSyncEngine`] diffs the snapshot length
//!   against its [`PeerCursor`] and delivers only the new tail, in order.
//! - A dropped frame needs no retry: the next tick carries the complete
//!   history again. A duplicated frame delivers nothing twice.
//!
//! The cost is that frame size grows with the log for the session's
//! lifetime; there is no compaction.
//!
//! ## Message Flow
//!
//! ```text
//! Peer A                                   Peer B
//!   |----- Snapshot [A1]      ----------->|  delivers A1
//!   |----- Snapshot [A1]      ----x       |  (dropped, no harm)
//!   |----- Snapshot [A1,A2]   ----------->|  delivers A2
//!   |<---- Snapshot [B1]      ------------|  delivers B1
//!   |----- Snapshot [A1,A2]   ----------->|  (redundant, discarded)
//! ```

pub mod cursor;
pub mod engine;
pub mod error;
pub mod transport;
pub mod wire;

pub use cursor::PeerCursor;
pub use engine::{DeltaSyncEngine, SyncConfig};
pub use error::{Result, SyncError};
pub use transport::{
    memory::MemoryChannel, memory::MemoryHub, memory::MemoryListener, ChannelEvent, Connector,
    Incoming, TransportChannel,
};
pub use wire::{Snapshot, PROTOCOL_VERSION};
