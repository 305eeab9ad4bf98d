//! Wire format for broadcast frames.
//!
//! Every broadcast tick sends one frame: the sender's entire outgoing log,
//! CBOR-encoded. There are no other frame types; reliability comes from
//! the receiver diffing each snapshot against its cursor, not from acks.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use tandem_core::{Action, SessionId};

use crate::error::{Result, SyncError};

/// Current protocol version, stamped into every frame.
pub const PROTOCOL_VERSION: u8 = 0;

/// One full-history broadcast: the sender's complete outgoing log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Protocol version for compatibility checking.
    pub version: u8,
    /// The sending peer's identity.
    pub sender: SessionId,
    /// The sender's entire outgoing log, in append order.
    pub actions: Vec<Action>,
}

impl Snapshot {
    /// Build a snapshot of the given log contents.
    pub fn new(sender: SessionId, actions: Vec<Action>) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            sender,
            actions,
        }
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> u64 {
        self.actions.len() as u64
    }

    /// Whether the snapshot carries no entries.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Encode to CBOR bytes.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| SyncError::Frame(format!("encode: {e}")))?;
        Ok(Bytes::from(buf))
    }

    /// Decode from CBOR bytes and check the version.
    pub fn decode(frame: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = ciborium::from_reader(frame)
            .map_err(|e| SyncError::Frame(format!("decode: {e}")))?;

        if snapshot.version != PROTOCOL_VERSION {
            return Err(SyncError::VersionMismatch {
                local: PROTOCOL_VERSION,
                peer: snapshot.version,
            });
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip() {
        let sender = SessionId::from_raw(42);
        let snapshot = Snapshot::new(
            sender,
            vec![
                Action::ready(sender),
                Action::app("MOVE", b"e4".to_vec()),
            ],
        );

        let frame = snapshot.encode().unwrap();
        let decoded = Snapshot::decode(&frame).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_empty_snapshot_roundtrip() {
        let snapshot = Snapshot::new(SessionId::from_raw(1), vec![]);
        let decoded = Snapshot::decode(&snapshot.encode().unwrap()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = Snapshot::decode(b"definitely not cbor").unwrap_err();
        assert!(matches!(err, SyncError::Frame(_)));
    }

    #[test]
    fn test_decode_rejects_version_mismatch() {
        let mut snapshot = Snapshot::new(SessionId::from_raw(1), vec![]);
        snapshot.version = PROTOCOL_VERSION + 1;

        let mut buf = Vec::new();
        ciborium::into_writer(&snapshot, &mut buf).unwrap();

        let err = Snapshot::decode(&buf).unwrap_err();
        assert!(matches!(err, SyncError::VersionMismatch { .. }));
        assert!(err.is_protocol_violation());
    }
}
