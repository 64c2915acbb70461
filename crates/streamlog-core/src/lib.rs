//! # Stream Log Core
//!
//! Pure primitives for the stream log: records, oracle crypto, governance
//! configuration and the submission validation pipeline.
//!
//! This crate contains no storage and no I/O. Everything here is a pure
//! function of its inputs.
//!
//! ## Key Types
//!
//! - [`Stream`] - A committed, oracle-attested engagement event
//! - [`StreamSubmission`] - The caller-supplied fields of a new event
//! - [`StreamId`] / [`ContentId`] / [`Principal`] - Identifiers
//! - [`ConfigStore`] - Governance state (authority, oracle key, fee, capacity)
//! - [`LogError`] - Classified failure of any operation
//!
//! ## Oracle Attestation
//!
//! Every submission carries a signature over the digest of the canonical
//! message `decimal(content_id) || performer_id || decimal(timestamp)`. See
//! [`canonical`]. Hashing and verification are behind the [`MessageHasher`]
//! and [`SignatureVerifier`] traits.

pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{oracle_digest, oracle_message};
pub use config::{ConfigStore, LoggerConfig};
pub use crypto::{
    Blake3Hasher, Digest, Ed25519Verifier, MessageHasher, OracleKeypair, OraclePublicKey,
    OracleSignature, Sha256Hasher, SignatureVerifier,
};
pub use error::{LogError, Result};
pub use record::{Stream, StreamSubmission, StreamUpdate, SubmissionBuilder};
pub use types::{ContentId, Principal, StreamId};
pub use validation::{
    validate_duration, validate_submission, validate_timestamp, SubmissionContext,
};
