//! Stub signature verifiers.
//!
//! Useful when a test needs to drive thousands of submissions, or needs to
//! reach a check that comes after signature verification without holding
//! the oracle key.

use streamlog_core::{Digest, OraclePublicKey, OracleSignature, SignatureVerifier};

/// Accepts every signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

impl SignatureVerifier for AcceptAllVerifier {
    fn verify(&self, _: &Digest, _: &OracleSignature, _: &OraclePublicKey) -> bool {
        true
    }
}

/// Rejects every signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAllVerifier;

impl SignatureVerifier for RejectAllVerifier {
    fn verify(&self, _: &Digest, _: &OracleSignature, _: &OraclePublicKey) -> bool {
        false
    }
}
