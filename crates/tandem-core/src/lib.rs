//! # Tandem Core
//!
//! Pure primitives for tandem sessions: identities, actions, addresses,
//! and the outgoing log.
//!
//! This crate contains no I/O and no networking. It is the data model
//! shared by the sync engine and the session facade.
//!
//! ## Key Types
//!
//! - [`SessionId`] - Names one peer for the lifetime of one session
//! - [`Role`] - Host (publishes the address) or Join (consumes it)
//! - [`Action`] - Opaque application payload tagged with an [`ActionKind`]
//! - [`OutgoingLog`] - Append-only record of local actions
//! - [`JoinAddress`] - `<base>?id=<sessionId>`, the shareable dial target

pub mod action;
pub mod address;
pub mod error;
pub mod log;
pub mod types;

pub use action::{Action, ActionKind};
pub use address::JoinAddress;
pub use error::{CoreError, Result};
pub use log::OutgoingLog;
pub use types::{Role, SessionId};
