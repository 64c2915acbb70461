//! Proptest generators for property-based testing.

use proptest::prelude::*;

use streamlog_core::validation::{
    MAX_DEVICE_TYPE, MAX_DURATION, MAX_ENGAGEMENT_TYPE, MAX_GEO_REGION, MIN_DURATION,
    TIMESTAMP_WINDOW,
};
use streamlog_core::{
    ContentId, OracleKeypair, Principal, Sha256Hasher, StreamSubmission, SubmissionBuilder,
};

/// Generate a random oracle keypair.
pub fn oracle_keypair() -> impl Strategy<Value = OracleKeypair> {
    any::<[u8; 32]>().prop_map(|seed| OracleKeypair::from_seed(&seed))
}

/// Generate a valid (non-zero) content id.
pub fn content_id() -> impl Strategy<Value = ContentId> {
    (1u64..=u64::MAX).prop_map(ContentId::new)
}

/// Generate a principal that is never the burn identity.
pub fn principal() -> impl Strategy<Value = Principal> {
    "ST[0-9A-Z]{4,12}".prop_map(Principal::new)
}

/// Generate a timestamp inside the acceptance window for `now`.
pub fn timestamp_in_window(now: u64) -> impl Strategy<Value = u64> {
    now..=now.saturating_add(TIMESTAMP_WINDOW)
}

/// Generate an in-range duration.
pub fn duration() -> impl Strategy<Value = u64> {
    MIN_DURATION..=MAX_DURATION
}

/// Parameters for a submission that passes every field check.
#[derive(Debug, Clone)]
pub struct SubmissionParams {
    pub content_id: ContentId,
    pub performer: Principal,
    pub listener: Option<Principal>,
    pub geo_region: u32,
    pub device_type: u8,
    pub engagement_type: u8,
    /// Offset of the timestamp from the logical clock, within the window.
    pub timestamp_offset: u64,
    pub duration: u64,
}

impl Arbitrary for SubmissionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            1u64..=50u64, // content id, small so ids collide
            principal(),
            proptest::option::of(principal()),
            0u32..=MAX_GEO_REGION,
            0u8..=MAX_DEVICE_TYPE,
            0u8..=MAX_ENGAGEMENT_TYPE,
            0u64..=TIMESTAMP_WINDOW,
            duration(),
        )
            .prop_map(
                |(content, performer, listener, geo, device, engagement, offset, duration)| {
                    SubmissionParams {
                        content_id: ContentId::new(content),
                        performer,
                        listener,
                        geo_region: geo,
                        device_type: device,
                        engagement_type: engagement,
                        timestamp_offset: offset,
                        duration,
                    }
                },
            )
            .boxed()
    }
}

/// Build and sign a submission from parameters at logical time `now`.
pub fn submission_from_params(
    params: &SubmissionParams,
    oracle: &OracleKeypair,
    now: u64,
) -> StreamSubmission {
    let mut builder = SubmissionBuilder::new(
        params.content_id,
        params.performer.clone(),
        now.saturating_add(params.timestamp_offset),
    )
    .geo_region(params.geo_region)
    .device_type(params.device_type)
    .engagement_type(params.engagement_type)
    .duration(params.duration);

    if let Some(listener) = &params.listener {
        builder = builder.listener(listener.clone());
    }

    builder.sign(oracle, &Sha256Hasher)
}
