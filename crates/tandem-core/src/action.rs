//! Actions: the opaque application payloads exchanged between peers.
//!
//! An action is a tagged record `{ kind, payload }`. The payload is opaque
//! to the core; ordering among actions from the same originator is
//! semantically significant. Two kinds are reserved for the core itself:
//! `READY` (handshake, payload = sender's session id) and `HOST_URL`
//! (payload = the join address, delivered locally to the host only).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::JoinAddress;
use crate::types::SessionId;

/// Wire name of the handshake kind.
const KIND_READY: &str = "READY";
/// Wire name of the local-only host address kind.
const KIND_HOST_URL: &str = "HOST_URL";

/// Discriminator for how an [`Action`] payload is to be interpreted.
///
/// Serializes as a plain string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Handshake: payload is the sender's session id as decimal utf-8.
    Ready,
    /// Local-only: payload is the generated join address. Never transmitted.
    HostUrl,
    /// Application-defined kind, uninterpreted by the core.
    App(String),
}

impl ActionKind {
    /// The wire string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Ready => KIND_READY,
            ActionKind::HostUrl => KIND_HOST_URL,
            ActionKind::App(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            KIND_READY => ActionKind::Ready,
            KIND_HOST_URL => ActionKind::HostUrl,
            _ => ActionKind::App(s),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable, opaque application payload tagged with a kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Discriminator for the payload.
    pub kind: ActionKind,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

impl Action {
    /// Create an action with an explicit kind.
    pub fn new(kind: ActionKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// Create an application-defined action.
    pub fn app(kind: impl Into<String>, payload: Vec<u8>) -> Self {
        Self::new(ActionKind::App(kind.into()), payload)
    }

    /// Create the handshake action carrying the sender's identity.
    pub fn ready(id: SessionId) -> Self {
        Self::new(ActionKind::Ready, id.to_string().into_bytes())
    }

    /// Create the local-only action carrying the generated join address.
    pub fn host_url(address: &JoinAddress) -> Self {
        Self::new(ActionKind::HostUrl, address.to_string().into_bytes())
    }

    /// If this is a `READY` action, extract the sender's session id.
    pub fn ready_peer(&self) -> Option<SessionId> {
        if self.kind != ActionKind::Ready {
            return None;
        }
        self.payload_str()?.parse().ok()
    }

    /// View the payload as utf-8, if it is.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_strings() {
        assert_eq!(ActionKind::Ready.as_str(), "READY");
        assert_eq!(ActionKind::HostUrl.as_str(), "HOST_URL");
        assert_eq!(ActionKind::App("PLACE_STONE".into()).as_str(), "PLACE_STONE");
    }

    #[test]
    fn test_kind_from_string_reserves_core_kinds() {
        assert_eq!(ActionKind::from("READY".to_string()), ActionKind::Ready);
        assert_eq!(ActionKind::from("HOST_URL".to_string()), ActionKind::HostUrl);
        assert_eq!(
            ActionKind::from("MOVE".to_string()),
            ActionKind::App("MOVE".into())
        );
    }

    #[test]
    fn test_kind_serializes_as_string() {
        let json = serde_json::to_string(&ActionKind::Ready).unwrap();
        assert_eq!(json, "\"READY\"");

        let kind: ActionKind = serde_json::from_str("\"MOVE\"").unwrap();
        assert_eq!(kind, ActionKind::App("MOVE".into()));
    }

    #[test]
    fn test_ready_roundtrip() {
        let id = SessionId::from_raw(1736870400123);
        let action = Action::ready(id);
        assert_eq!(action.ready_peer(), Some(id));
    }

    #[test]
    fn test_ready_peer_on_other_kinds() {
        let action = Action::app("MOVE", b"e4".to_vec());
        assert_eq!(action.ready_peer(), None);

        // Right kind, garbage payload
        let action = Action::new(ActionKind::Ready, vec![0xff, 0xfe]);
        assert_eq!(action.ready_peer(), None);
    }

    #[test]
    fn test_host_url_payload() {
        let addr = JoinAddress::new("tandem://local", SessionId::from_raw(7));
        let action = Action::host_url(&addr);
        assert_eq!(action.payload_str(), Some("tandem://local?id=7"));
    }
}
