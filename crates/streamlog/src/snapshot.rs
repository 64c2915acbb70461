//! Whole-logger snapshots.
//!
//! A snapshot captures the governance configuration together with the
//! in-memory store. The fee transfer and the crypto backends are not part of
//! the snapshot and are supplied again on restore.

use serde::{Deserialize, Serialize};
use streamlog_core::{ConfigStore, MessageHasher, SignatureVerifier};
use streamlog_store::{decode_snapshot, encode_snapshot, MemoryStore, Result, StoreError};

use crate::logger::StreamLogger;
use crate::transfer::FeeTransfer;

#[derive(Serialize, Deserialize)]
struct LoggerState {
    config: ConfigStore,
    store: MemoryStore,
}

impl<T, H, V> StreamLogger<T, MemoryStore, H, V>
where
    T: FeeTransfer,
    H: MessageHasher,
    V: SignatureVerifier,
{
    /// Encode configuration and records as a CBOR snapshot.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct LoggerStateRef<'a> {
            config: &'a ConfigStore,
            store: &'a MemoryStore,
        }

        encode_snapshot(&LoggerStateRef {
            config: &self.config,
            store: &self.store,
        })
    }

    /// Rebuild a logger from a snapshot.
    ///
    /// Fails if the snapshot does not decode, its store is inconsistent, or
    /// its configuration holds a value the governance setters never produce.
    pub fn restore(bytes: &[u8], transfer: T, hasher: H, verifier: V) -> Result<Self> {
        let state: LoggerState = decode_snapshot(bytes)?;
        if state.config.max_streams() == 0 {
            return Err(StoreError::Integrity("max_streams must be positive".into()));
        }
        state.store.verify_integrity()?;

        tracing::info!(
            streams = state.store.len(),
            authority = state.config.authority().is_some(),
            "logger restored from snapshot"
        );
        Ok(Self {
            config: state.config,
            store: state.store,
            transfer,
            hasher,
            verifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CallContext;
    use crate::transfer::TransferLedger;
    use streamlog_core::{
        ContentId, Ed25519Verifier, LoggerConfig, OracleKeypair, Principal, Sha256Hasher, StreamId,
        SubmissionBuilder,
    };

    #[test]
    fn test_restore_preserves_state() {
        let oracle = OracleKeypair::from_seed(&[7; 32]);
        let mut logger = StreamLogger::new(TransferLedger::new(), LoggerConfig::default());
        let admin = CallContext::new("ST2TEST", 0);
        logger.set_authority(&admin, Principal::new("ST2TEST")).unwrap();
        logger.set_oracle_public_key(&admin, oracle.public_key()).unwrap();
        logger.set_log_fee(&admin, 3).unwrap();

        let ctx = CallContext::new("ST3PERF", 0);
        for ts in [10, 12, 10] {
            let submission =
                SubmissionBuilder::new(ContentId::new(4), Principal::new("ST3PERF"), ts)
                    .duration(60)
                    .sign(&oracle, &Sha256Hasher);
            logger.submit(&ctx, submission).unwrap();
        }
        logger.amend(&ctx.at(1), StreamId::new(1), 90).unwrap();

        let bytes = logger.snapshot().unwrap();
        let restored =
            StreamLogger::restore(&bytes, TransferLedger::new(), Sha256Hasher, Ed25519Verifier)
                .unwrap();

        assert_eq!(restored.config(), logger.config());
        assert_eq!(restored.store(), logger.store());
        assert_eq!(restored.get_total_streams(), 3);
        assert_eq!(
            restored.streams_in_range(ContentId::new(4), 0, 20),
            vec![StreamId::new(0), StreamId::new(2), StreamId::new(1)]
        );
        assert_eq!(restored.get_stream_update(StreamId::new(1)).unwrap().update_duration, 90);
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let result = StreamLogger::restore(
            b"\xff\x00",
            TransferLedger::new(),
            Sha256Hasher,
            Ed25519Verifier,
        );
        assert!(matches!(result, Err(StoreError::Decoding(_))));
    }

    #[test]
    fn test_restore_rejects_zero_capacity() {
        let config = ConfigStore::new(&LoggerConfig {
            max_streams: 0,
            ..LoggerConfig::default()
        });
        let bytes = encode_snapshot(&LoggerState {
            config,
            store: MemoryStore::new(),
        })
        .unwrap();

        let result = StreamLogger::restore(
            &bytes,
            TransferLedger::new(),
            Sha256Hasher,
            Ed25519Verifier,
        );
        assert!(matches!(result, Err(StoreError::Integrity(_))));
    }
}
