//! Error types for the sync crate.

use thiserror::Error;

/// Errors that can occur in the transport layer or the sync engine.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Protocol version mismatch with peer. Fatal.
    #[error("protocol version mismatch: local={local}, peer={peer}")]
    VersionMismatch { local: u8, peer: u8 },

    /// A received frame could not be decoded. Fatal.
    #[error("invalid frame: {0}")]
    Frame(String),

    /// The peer's log appears shorter than previously observed.
    ///
    /// The log is defined as append-only and non-shrinking, so this is a
    /// protocol violation and tears the session down.
    #[error("peer snapshot rewound: seen {seen} entries, received {received}")]
    SnapshotRewind { seen: u64, received: u64 },

    /// Transport-level send or connection failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// No peer is registered under the dialed session id.
    #[error("peer not reachable: {0}")]
    PeerNotReachable(String),

    /// The channel is closed.
    #[error("channel closed")]
    ChannelClosed,
}

impl SyncError {
    /// Whether this error is a protocol violation (as opposed to a
    /// transport fault).
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            SyncError::SnapshotRewind { .. } | SyncError::VersionMismatch { .. } | SyncError::Frame(_)
        )
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
