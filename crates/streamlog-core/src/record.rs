//! Stream records: the committed event, its amendment audit entry, and the
//! submission that produces it.
//!
//! A [`Stream`] is immutable once committed except for `duration`, which only
//! the performer may amend. Amendments are audited by a single
//! [`StreamUpdate`] per record, overwritten on each amendment.

use serde::{Deserialize, Serialize};

use crate::canonical::oracle_digest;
use crate::crypto::{MessageHasher, OracleKeypair, OracleSignature};
use crate::types::{ContentId, Principal};

/// A committed, oracle-attested content-engagement event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub content_id: ContentId,
    pub performer_id: Principal,
    pub listener_id: Option<Principal>,
    /// 0..=1000
    pub geo_region: u32,
    /// 0..=10
    pub device_type: u8,
    /// Logical clock units.
    pub timestamp: u64,
    /// 0..=5
    pub engagement_type: u8,
    /// Seconds, 1..=3600. The only mutable field.
    pub duration: u64,
    pub oracle_signature: OracleSignature,
    /// True once committed. Nothing revokes it.
    pub status: bool,
}

impl Stream {
    /// Materialize a validated submission as a committed record.
    pub fn committed(submission: StreamSubmission) -> Self {
        Self {
            content_id: submission.content_id,
            performer_id: submission.performer_id,
            listener_id: submission.listener_id,
            geo_region: submission.geo_region,
            device_type: submission.device_type,
            timestamp: submission.timestamp,
            engagement_type: submission.engagement_type,
            duration: submission.duration,
            oracle_signature: submission.oracle_signature,
            status: true,
        }
    }
}

/// Audit entry for the most recent amendment of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamUpdate {
    /// Logical clock at amendment.
    pub update_timestamp: u64,
    /// The new duration.
    pub update_duration: u64,
    /// Who amended it. Always the performer.
    pub updater: Principal,
}

/// The caller-supplied fields of a new stream event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSubmission {
    pub content_id: ContentId,
    pub performer_id: Principal,
    pub listener_id: Option<Principal>,
    pub geo_region: u32,
    pub device_type: u8,
    pub timestamp: u64,
    pub engagement_type: u8,
    pub duration: u64,
    pub oracle_signature: OracleSignature,
}

/// Builder for [`StreamSubmission`].
///
/// Optional fields default to zero / `None`; `duration` defaults to 0, which
/// the validation pipeline rejects, so callers must set it.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    content_id: ContentId,
    performer_id: Principal,
    listener_id: Option<Principal>,
    geo_region: u32,
    device_type: u8,
    timestamp: u64,
    engagement_type: u8,
    duration: u64,
}

impl SubmissionBuilder {
    /// Start building a submission for the attested triple.
    pub fn new(content_id: ContentId, performer_id: Principal, timestamp: u64) -> Self {
        Self {
            content_id,
            performer_id,
            listener_id: None,
            geo_region: 0,
            device_type: 0,
            timestamp,
            engagement_type: 0,
            duration: 0,
        }
    }

    /// Set the listener.
    pub fn listener(mut self, listener: Principal) -> Self {
        self.listener_id = Some(listener);
        self
    }

    /// Set the geo region.
    pub fn geo_region(mut self, geo_region: u32) -> Self {
        self.geo_region = geo_region;
        self
    }

    /// Set the device type.
    pub fn device_type(mut self, device_type: u8) -> Self {
        self.device_type = device_type;
        self
    }

    /// Set the engagement type.
    pub fn engagement_type(mut self, engagement_type: u8) -> Self {
        self.engagement_type = engagement_type;
        self
    }

    /// Set the duration in seconds.
    pub fn duration(mut self, duration: u64) -> Self {
        self.duration = duration;
        self
    }

    /// Finish with an externally produced oracle signature.
    pub fn signature(self, oracle_signature: OracleSignature) -> StreamSubmission {
        StreamSubmission {
            content_id: self.content_id,
            performer_id: self.performer_id,
            listener_id: self.listener_id,
            geo_region: self.geo_region,
            device_type: self.device_type,
            timestamp: self.timestamp,
            engagement_type: self.engagement_type,
            duration: self.duration,
            oracle_signature,
        }
    }

    /// Finish by signing the canonical oracle message with `oracle`.
    pub fn sign<H: MessageHasher + ?Sized>(
        self,
        oracle: &OracleKeypair,
        hasher: &H,
    ) -> StreamSubmission {
        let digest = oracle_digest(hasher, self.content_id, &self.performer_id, self.timestamp);
        let signature = oracle.sign_digest(&digest);
        self.signature(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519Verifier, Sha256Hasher, SignatureVerifier};

    #[test]
    fn test_builder_defaults() {
        let submission = SubmissionBuilder::new(ContentId::new(1), Principal::new("P"), 10)
            .signature(OracleSignature::ZERO);

        assert_eq!(submission.listener_id, None);
        assert_eq!(submission.geo_region, 0);
        assert_eq!(submission.duration, 0);
    }

    #[test]
    fn test_signed_submission_verifies() {
        let oracle = OracleKeypair::from_seed(&[0x11; 32]);
        let submission = SubmissionBuilder::new(ContentId::new(7), Principal::new("ST3PERF"), 42)
            .duration(300)
            .sign(&oracle, &Sha256Hasher);

        let digest = oracle_digest(
            &Sha256Hasher,
            submission.content_id,
            &submission.performer_id,
            submission.timestamp,
        );
        assert!(Ed25519Verifier.verify(
            &digest,
            &submission.oracle_signature,
            &oracle.public_key()
        ));
    }

    #[test]
    fn test_signature_ignores_unattested_fields() {
        let oracle = OracleKeypair::from_seed(&[0x11; 32]);
        let a = SubmissionBuilder::new(ContentId::new(7), Principal::new("P"), 42)
            .geo_region(1)
            .sign(&oracle, &Sha256Hasher);
        let b = SubmissionBuilder::new(ContentId::new(7), Principal::new("P"), 42)
            .geo_region(999)
            .duration(60)
            .sign(&oracle, &Sha256Hasher);

        assert_eq!(a.oracle_signature, b.oracle_signature);
    }

    #[test]
    fn test_committed_sets_status() {
        let submission = SubmissionBuilder::new(ContentId::new(1), Principal::new("P"), 10)
            .listener(Principal::new("L"))
            .duration(300)
            .signature(OracleSignature::ZERO);

        let stream = Stream::committed(submission);
        assert!(stream.status);
        assert_eq!(stream.listener_id, Some(Principal::new("L")));
        assert_eq!(stream.duration, 300);
    }
}
