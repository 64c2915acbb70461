//! Submission validation: the ordered checks a new stream event must pass.
//!
//! Checks run in a fixed order and the first failure wins, so the error a
//! caller sees for a malformed submission is deterministic:
//!
//! 1. capacity
//! 2. content id
//! 3. performer id
//! 4. geo region
//! 5. device type
//! 6. timestamp window
//! 7. engagement type
//! 8. duration
//! 9. oracle signature
//! 10. per-content rate limit
//! 11. authority set
//!
//! Validation is a pure read. Nothing here mutates state.

use crate::canonical::oracle_digest;
use crate::config::ConfigStore;
use crate::crypto::{MessageHasher, SignatureVerifier};
use crate::error::{LogError, Result};
use crate::record::StreamSubmission;
use crate::types::{Principal, StreamId};

/// Highest accepted geo region.
pub const MAX_GEO_REGION: u32 = 1000;

/// Highest accepted device type.
pub const MAX_DEVICE_TYPE: u8 = 10;

/// Highest accepted engagement type.
pub const MAX_ENGAGEMENT_TYPE: u8 = 5;

/// Shortest accepted duration, in seconds.
pub const MIN_DURATION: u64 = 1;

/// Longest accepted duration, in seconds.
pub const MAX_DURATION: u64 = 3600;

/// How far ahead of the current logical time a timestamp may be.
pub const TIMESTAMP_WINDOW: u64 = 144;

/// Maximum committed events per content id.
pub const RATE_LIMIT: u64 = 10_000;

/// Read-only view of the state a submission is validated against.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionContext<'a> {
    /// Governance configuration.
    pub config: &'a ConfigStore,
    /// Current logical time.
    pub now: u64,
    /// The id the submission would be assigned.
    pub next_stream_id: StreamId,
    /// Committed events so far for the submission's content id.
    pub content_event_count: u64,
}

/// Run the full validation pipeline.
///
/// On success returns the authority, which receives the log fee.
pub fn validate_submission<'a, H, V>(
    ctx: &SubmissionContext<'a>,
    submission: &StreamSubmission,
    hasher: &H,
    verifier: &V,
) -> Result<&'a Principal>
where
    H: MessageHasher + ?Sized,
    V: SignatureVerifier + ?Sized,
{
    // 1. Capacity
    if ctx.next_stream_id.get() >= ctx.config.max_streams() {
        return Err(LogError::CapacityExceeded);
    }

    // 2. Content id
    if !submission.content_id.is_valid() {
        return Err(LogError::InvalidContentId);
    }

    // 3. Performer id
    if submission.performer_id.is_burn() {
        return Err(LogError::InvalidPerformerId);
    }

    // 4. Geo region
    if submission.geo_region > MAX_GEO_REGION {
        return Err(LogError::InvalidGeoRegion(submission.geo_region));
    }

    // 5. Device type
    if submission.device_type > MAX_DEVICE_TYPE {
        return Err(LogError::InvalidDeviceType(submission.device_type));
    }

    // 6. Timestamp window
    validate_timestamp(submission.timestamp, ctx.now)?;

    // 7. Engagement type
    if submission.engagement_type > MAX_ENGAGEMENT_TYPE {
        return Err(LogError::InvalidEngagementType(submission.engagement_type));
    }

    // 8. Duration
    validate_duration(submission.duration)?;

    // 9. Oracle signature
    let digest = oracle_digest(
        hasher,
        submission.content_id,
        &submission.performer_id,
        submission.timestamp,
    );
    if !verifier.verify(
        &digest,
        &submission.oracle_signature,
        ctx.config.oracle_public_key(),
    ) {
        return Err(LogError::InvalidOracleSignature);
    }

    // 10. Rate limit
    if ctx.content_event_count >= RATE_LIMIT {
        return Err(LogError::RateLimitExceeded);
    }

    // 11. Authority
    ctx.config.require_authority()
}

/// Check a timestamp lies in `[now, now + TIMESTAMP_WINDOW]`.
pub fn validate_timestamp(timestamp: u64, now: u64) -> Result<()> {
    if timestamp < now || timestamp > now.saturating_add(TIMESTAMP_WINDOW) {
        return Err(LogError::InvalidTimestamp { timestamp, now });
    }
    Ok(())
}

/// Check a duration lies in `[MIN_DURATION, MAX_DURATION]`.
pub fn validate_duration(duration: u64) -> Result<()> {
    if !(MIN_DURATION..=MAX_DURATION).contains(&duration) {
        return Err(LogError::InvalidDuration(duration));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;
    use crate::crypto::{Ed25519Verifier, OracleKeypair, OracleSignature, Sha256Hasher};
    use crate::record::SubmissionBuilder;
    use crate::types::ContentId;

    fn oracle() -> OracleKeypair {
        OracleKeypair::from_seed(&[0x42; 32])
    }

    fn configured() -> ConfigStore {
        let mut config = ConfigStore::new(&LoggerConfig {
            oracle_public_key: oracle().public_key(),
            ..LoggerConfig::default()
        });
        config.set_authority(Principal::new("ST2TEST")).unwrap();
        config
    }

    fn ctx(config: &ConfigStore) -> SubmissionContext<'_> {
        SubmissionContext {
            config,
            now: 0,
            next_stream_id: StreamId::ZERO,
            content_event_count: 0,
        }
    }

    fn builder() -> SubmissionBuilder {
        SubmissionBuilder::new(ContentId::new(1), Principal::new("ST3PERF"), 10)
            .geo_region(100)
            .device_type(1)
            .engagement_type(1)
            .duration(300)
    }

    fn validate(ctx: &SubmissionContext<'_>, submission: &StreamSubmission) -> Result<()> {
        validate_submission(ctx, submission, &Sha256Hasher, &Ed25519Verifier).map(|_| ())
    }

    #[test]
    fn test_valid_submission() {
        let config = configured();
        let submission = builder().sign(&oracle(), &Sha256Hasher);
        let recipient =
            validate_submission(&ctx(&config), &submission, &Sha256Hasher, &Ed25519Verifier)
                .unwrap();
        assert_eq!(recipient, &Principal::new("ST2TEST"));
    }

    #[test]
    fn test_capacity_checked_first() {
        let config = configured();
        let mut context = ctx(&config);
        context.next_stream_id = StreamId::new(config.max_streams());

        // Every other field is invalid too.
        let submission = SubmissionBuilder::new(ContentId::new(0), Principal::burn(), 9999)
            .geo_region(5000)
            .signature(OracleSignature::ZERO);

        assert_eq!(validate(&context, &submission), Err(LogError::CapacityExceeded));
    }

    #[test]
    fn test_content_id_before_performer() {
        let config = configured();
        let submission = SubmissionBuilder::new(ContentId::new(0), Principal::burn(), 10)
            .duration(300)
            .signature(OracleSignature::ZERO);

        assert_eq!(validate(&ctx(&config), &submission), Err(LogError::InvalidContentId));
    }

    #[test]
    fn test_burn_performer() {
        let config = configured();
        let submission = SubmissionBuilder::new(ContentId::new(1), Principal::burn(), 10)
            .duration(300)
            .sign(&oracle(), &Sha256Hasher);

        assert_eq!(validate(&ctx(&config), &submission), Err(LogError::InvalidPerformerId));
    }

    #[test]
    fn test_field_ranges() {
        let config = configured();
        let context = ctx(&config);
        let kp = oracle();

        let s = builder().geo_region(1001).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Err(LogError::InvalidGeoRegion(1001)));

        let s = builder().geo_region(1000).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Ok(()));

        let s = builder().device_type(11).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Err(LogError::InvalidDeviceType(11)));

        let s = builder().engagement_type(6).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Err(LogError::InvalidEngagementType(6)));

        let s = builder().duration(0).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Err(LogError::InvalidDuration(0)));

        let s = builder().duration(3601).sign(&kp, &Sha256Hasher);
        assert_eq!(validate(&context, &s), Err(LogError::InvalidDuration(3601)));
    }

    #[test]
    fn test_timestamp_window() {
        assert!(validate_timestamp(100, 100).is_ok());
        assert!(validate_timestamp(244, 100).is_ok());
        assert_eq!(
            validate_timestamp(245, 100),
            Err(LogError::InvalidTimestamp { timestamp: 245, now: 100 })
        );
        assert_eq!(
            validate_timestamp(99, 100),
            Err(LogError::InvalidTimestamp { timestamp: 99, now: 100 })
        );
        assert!(validate_timestamp(u64::MAX, u64::MAX - 1).is_ok());
    }

    #[test]
    fn test_timestamp_before_engagement() {
        let config = configured();
        let submission = SubmissionBuilder::new(ContentId::new(1), Principal::new("P"), 200)
            .engagement_type(9)
            .signature(OracleSignature::ZERO);

        assert!(matches!(
            validate(&ctx(&config), &submission),
            Err(LogError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_bad_signature() {
        let config = configured();
        let mut submission = builder().sign(&oracle(), &Sha256Hasher);
        submission.timestamp = 11;

        assert_eq!(
            validate(&ctx(&config), &submission),
            Err(LogError::InvalidOracleSignature)
        );
    }

    #[test]
    fn test_signature_by_other_oracle() {
        let config = configured();
        let impostor = OracleKeypair::from_seed(&[0x99; 32]);
        let submission = builder().sign(&impostor, &Sha256Hasher);

        assert_eq!(
            validate(&ctx(&config), &submission),
            Err(LogError::InvalidOracleSignature)
        );
    }

    #[test]
    fn test_rate_limit() {
        let config = configured();
        let mut context = ctx(&config);
        context.content_event_count = RATE_LIMIT - 1;
        let submission = builder().sign(&oracle(), &Sha256Hasher);
        assert_eq!(validate(&context, &submission), Ok(()));

        context.content_event_count = RATE_LIMIT;
        assert_eq!(validate(&context, &submission), Err(LogError::RateLimitExceeded));
    }

    #[test]
    fn test_authority_checked_last() {
        let config = ConfigStore::new(&LoggerConfig {
            oracle_public_key: oracle().public_key(),
            ..LoggerConfig::default()
        });
        let submission = builder().sign(&oracle(), &Sha256Hasher);

        assert_eq!(validate(&ctx(&config), &submission), Err(LogError::AuthorityNotSet));

        let bad = builder().duration(0).sign(&oracle(), &Sha256Hasher);
        assert_eq!(validate(&ctx(&config), &bad), Err(LogError::InvalidDuration(0)));
    }

    #[test]
    fn test_validate_duration_bounds() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(3600).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(3601).is_err());
    }
}
