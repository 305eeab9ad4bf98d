//! Shareable join addresses.
//!
//! A join address is a base location plus a query parameter carrying the
//! host's session id: `<base>?id=<sessionId>`. The host publishes it, the
//! joiner parses the id back out and dials it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::SessionId;

/// The query parameter key carrying the host's session id.
const ID_PARAM: &str = "?id=";

/// A shareable address embedding the host's [`SessionId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinAddress {
    base: String,
    host_id: SessionId,
}

impl JoinAddress {
    /// Create an address for a host reachable at `base`.
    pub fn new(base: impl Into<String>, host_id: SessionId) -> Self {
        Self {
            base: base.into(),
            host_id,
        }
    }

    /// The base location, without the id parameter.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The host's session id, the joiner's dial target.
    pub fn host_id(&self) -> SessionId {
        self.host_id
    }
}

impl fmt::Display for JoinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, ID_PARAM, self.host_id)
    }
}

impl FromStr for JoinAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, rest) = s
            .split_once(ID_PARAM)
            .ok_or_else(|| CoreError::InvalidAddress(s.to_string()))?;

        // Tolerate trailing query parameters after the id.
        let id_str = rest.split('&').next().unwrap_or(rest);
        let host_id = id_str
            .parse::<SessionId>()
            .map_err(|_| CoreError::InvalidAddress(s.to_string()))?;

        Ok(Self {
            base: base.to_string(),
            host_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let addr = JoinAddress::new("tandem://local", SessionId::from_raw(42));
        assert_eq!(addr.to_string(), "tandem://local?id=42");
    }

    #[test]
    fn test_address_roundtrip() {
        let addr = JoinAddress::new("https://play.example", SessionId::from_raw(1736870400123));
        let parsed: JoinAddress = addr.to_string().parse().unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn test_address_tolerates_extra_params() {
        let parsed: JoinAddress = "https://play.example?id=99&lang=en".parse().unwrap();
        assert_eq!(parsed.host_id(), SessionId::from_raw(99));
        assert_eq!(parsed.base(), "https://play.example");
    }

    #[test]
    fn test_address_rejects_missing_id() {
        assert!("https://play.example".parse::<JoinAddress>().is_err());
        assert!("https://play.example?id=".parse::<JoinAddress>().is_err());
        assert!("https://play.example?id=abc".parse::<JoinAddress>().is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn address_roundtrips_any_id(raw in any::<u64>()) {
                let addr = JoinAddress::new("tandem://local", SessionId::from_raw(raw));
                let parsed: JoinAddress = addr.to_string().parse().unwrap();
                prop_assert_eq!(addr, parsed);
            }
        }
    }
}
