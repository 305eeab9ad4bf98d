//! Error types for the core crate.

use thiserror::Error;

/// Errors produced by core parsing and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A join address could not be parsed.
    #[error("invalid join address: {0}")]
    InvalidAddress(String),

    /// A session id could not be parsed.
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
