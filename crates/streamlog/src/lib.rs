//! # Stream Log
//!
//! An append-only log of oracle-attested stream engagement events, with
//! single-authority governance, a per-event fee and time-indexed range
//! queries.
//!
//! ## Overview
//!
//! - **Submission**: a caller submits an event signed by the off-chain
//!   oracle. It is validated, the fee is charged, and the record is committed
//!   under the next dense [`StreamId`].
//! - **Amendment**: the performer named in a record may rewrite its duration.
//!   The latest amendment is kept as an audit entry.
//! - **Governance**: an authority, set once, controls the oracle key. It also
//!   receives every fee.
//! - **Queries**: records, amendments, per-content counts, batch
//!   verification and bounded timestamp range lookups.
//!
//! ## Usage
//!
//! ```rust
//! use streamlog::{CallContext, ContentId, LoggerConfig, OracleKeypair, Principal};
//! use streamlog::{Sha256Hasher, StreamId, StreamLogger, SubmissionBuilder, TransferLedger};
//!
//! let oracle = OracleKeypair::from_seed(&[1; 32]);
//! let mut logger = StreamLogger::new(TransferLedger::new(), LoggerConfig::default());
//!
//! let admin = CallContext::new("ST2TEST", 0);
//! logger.set_authority(&admin, Principal::new("ST2TEST")).unwrap();
//! logger.set_oracle_public_key(&admin, oracle.public_key()).unwrap();
//!
//! let submission = SubmissionBuilder::new(ContentId::new(1), Principal::new("ST3PERF"), 10)
//!     .geo_region(100)
//!     .device_type(1)
//!     .engagement_type(1)
//!     .duration(300)
//!     .sign(&oracle, &Sha256Hasher);
//!
//! let id = logger.submit(&CallContext::new("ST1TEST", 0), submission).unwrap();
//! assert_eq!(id, StreamId::ZERO);
//! assert_eq!(logger.streams_in_range(ContentId::new(1), 0, 20), vec![id]);
//! ```
//!
//! ## Re-exports
//!
//! - `streamlog::core` - records, identifiers, crypto and validation
//! - `streamlog::store` - the record store trait and in-memory backend

pub mod context;
pub mod logger;
pub mod snapshot;
pub mod transfer;

pub use streamlog_core as core;
pub use streamlog_store as store;

pub use context::CallContext;
pub use logger::StreamLogger;
pub use transfer::{FeeTransfer, TransferError, TransferLedger, TransferRecord};

pub use streamlog_core::{
    Blake3Hasher, ConfigStore, ContentId, Digest, Ed25519Verifier, LogError, LoggerConfig,
    MessageHasher, OracleKeypair, OraclePublicKey, OracleSignature, Principal, Result,
    Sha256Hasher, SignatureVerifier, Stream, StreamId, StreamSubmission, StreamUpdate,
    SubmissionBuilder,
};
pub use streamlog_store::{MemoryStore, RecordStore, StoreError};
