//! Error types for the session facade.

use tandem_core::CoreError;
use tandem_sync::SyncError;
use thiserror::Error;

/// Errors surfaced to the application.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The transport could not be opened (host) or connected (join).
    ///
    /// Surfaced once from `host`/`join`/`established`; never auto-retried.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// Protocol violation or transport failure during a running session.
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    /// Address or identity parsing failed.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl SessionError {
    /// Whether the peer violated the protocol (as opposed to the
    /// transport failing or negotiation falling through).
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, SessionError::Sync(e) if e.is_protocol_violation())
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
