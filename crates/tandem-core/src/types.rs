//! Identity types for a tandem session.
//!
//! A session is exactly two peers; each peer names itself with a
//! [`SessionId`] generated once when it enters a [`Role`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Opaque token identifying one peer for the lifetime of one session.
///
/// Generated from a clock reading mixed with random low bits, so two
/// peers entering a role within the same millisecond still get distinct
/// ids. The joiner also uses the host's id as its dial target, so the
/// id must round-trip through the join address query string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Generate a fresh id for one role-entry.
    pub fn generate() -> Self {
        let entropy: u16 = rand::random();
        Self((now_millis() << 16) | u64::from(entropy))
    }

    /// Create from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidSessionId(s.to_string()))
    }
}

/// Which side of the session this peer is.
///
/// The host publishes a join address and waits for an inbound
/// connection; the joiner consumes a known address and dials out.
/// Fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Creates and publishes the session address.
    Host,
    /// Consumes a known address and connects outbound.
    Join,
}

impl Role {
    /// Check whether this is the hosting side.
    pub fn is_host(&self) -> bool {
        matches!(self, Role::Host)
    }
}

/// Get current time in milliseconds.
fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_display_roundtrip() {
        let id = SessionId::from_raw(1736870400123);
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_session_id_generate_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_id_parse_rejects_garbage() {
        assert!("not-a-number".parse::<SessionId>().is_err());
        assert!("".parse::<SessionId>().is_err());
        assert!("-5".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_role_is_host() {
        assert!(Role::Host.is_host());
        assert!(!Role::Join.is_host());
    }
}
