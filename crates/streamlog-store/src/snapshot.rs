//! CBOR snapshots of store state.
//!
//! A snapshot is a versioned CBOR envelope. Decoding always runs the store's
//! integrity check, so a snapshot that decodes is also internally consistent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u8,
    body: T,
}

/// Encode `value` as a versioned CBOR snapshot.
pub fn encode_snapshot<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        body: value,
    };
    let mut buf = Vec::new();
    ciborium::into_writer(&envelope, &mut buf).map_err(|e| StoreError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Decode a versioned CBOR snapshot.
///
/// Callers are responsible for checking the integrity of the decoded value.
pub fn decode_snapshot<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let envelope: Envelope<T> =
        ciborium::from_reader(bytes).map_err(|e| StoreError::Decoding(e.to_string()))?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.body)
}

impl MemoryStore {
    /// Encode the store as a CBOR snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        encode_snapshot(self)
    }

    /// Restore a store from a CBOR snapshot, rejecting inconsistent state.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self> {
        let store: MemoryStore = decode_snapshot(bytes)?;
        store.verify_integrity()?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RecordStore;
    use streamlog_core::{
        ContentId, OracleSignature, Principal, Stream, StreamId, StreamUpdate, SubmissionBuilder,
    };

    fn populated() -> MemoryStore {
        let mut store = MemoryStore::new();
        for (content, ts) in [(1, 10), (1, 11), (2, 10), (1, 10)] {
            store.append_stream(Stream::committed(
                SubmissionBuilder::new(ContentId::new(content), Principal::new("P"), ts)
                    .listener(Principal::new("L"))
                    .duration(300)
                    .signature(OracleSignature::from_bytes([0xab; 64])),
            ));
        }
        store.amend_duration(
            StreamId::new(1),
            StreamUpdate {
                update_timestamp: 3,
                update_duration: 42,
                updater: Principal::new("P"),
            },
        );
        store
    }

    #[test]
    fn test_snapshot_restores_queries() {
        let store = populated();
        let bytes = store.to_snapshot().unwrap();
        let restored = MemoryStore::from_snapshot(&bytes).unwrap();

        assert_eq!(restored, store);
        assert_eq!(restored.next_stream_id(), StreamId::new(4));
        assert_eq!(
            restored.streams_in_range(ContentId::new(1), 10, 11),
            vec![StreamId::new(0), StreamId::new(3), StreamId::new(1)]
        );
        assert_eq!(restored.get_update(StreamId::new(1)).unwrap().update_duration, 42);
        assert_eq!(
            restored.get_stream(StreamId::new(2)).unwrap().oracle_signature,
            OracleSignature::from_bytes([0xab; 64])
        );
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let a = populated().to_snapshot().unwrap();
        let b = populated().to_snapshot().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_garbage_rejected() {
        let result = MemoryStore::from_snapshot(b"not cbor at all");
        assert!(matches!(result, Err(StoreError::Decoding(_))));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut buf = Vec::new();
        let envelope = Envelope {
            version: 99,
            body: MemoryStore::new(),
        };
        ciborium::into_writer(&envelope, &mut buf).unwrap();

        let result = MemoryStore::from_snapshot(&buf);
        assert!(matches!(result, Err(StoreError::UnsupportedVersion(99))));
    }
}
