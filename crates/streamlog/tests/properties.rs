//! Property tests over random submission sequences.

use proptest::prelude::*;

use streamlog::{ContentId, LogError, StreamId, StreamSubmission};
use streamlog_core::validation::TIMESTAMP_WINDOW;
use streamlog_testkit::{submission_from_params, SubmissionParams, TestFixture};

const NOW: u64 = 1_000;

fn fixture() -> TestFixture {
    let mut fx = TestFixture::with_seed([0x17; 32]);
    fx.now = NOW;
    fx
}

/// Break exactly one field of an otherwise valid submission.
fn corrupt(mut submission: StreamSubmission, which: u8) -> (StreamSubmission, LogError) {
    match which % 6 {
        0 => {
            submission.content_id = ContentId::new(0);
            (submission, LogError::InvalidContentId)
        }
        1 => {
            submission.geo_region = 1001;
            (submission, LogError::InvalidGeoRegion(1001))
        }
        2 => {
            submission.device_type = 200;
            (submission, LogError::InvalidDeviceType(200))
        }
        3 => {
            submission.engagement_type = 9;
            (submission, LogError::InvalidEngagementType(9))
        }
        4 => {
            submission.duration = 0;
            (submission, LogError::InvalidDuration(0))
        }
        _ => {
            submission.oracle_signature = streamlog::OracleSignature::ZERO;
            (submission, LogError::InvalidOracleSignature)
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ids_are_dense_and_indices_agree(batch in prop::collection::vec(any::<SubmissionParams>(), 1..40)) {
        let mut fx = fixture();
        let ctx = fx.caller_ctx();

        for (i, params) in batch.iter().enumerate() {
            let submission = submission_from_params(params, &fx.oracle, NOW);
            let id = fx.logger.submit(&ctx, submission);
            prop_assert_eq!(id, Ok(StreamId::new(i as u64)));
        }

        prop_assert_eq!(fx.logger.get_total_streams(), batch.len() as u64);
        prop_assert_eq!(fx.logger.transfer().transfers().len(), batch.len());

        let mut counted = 0;
        for content in 1..=50u64 {
            let content_id = ContentId::new(content);
            let count = fx.logger.get_event_count(content_id);
            counted += count;

            let ids = fx.logger.streams_in_range(content_id, NOW, NOW + TIMESTAMP_WINDOW);
            prop_assert_eq!(ids.len() as u64, count);

            let timestamps: Vec<u64> = ids
                .iter()
                .map(|&id| fx.logger.get_stream(id).map(|s| s.timestamp))
                .collect::<Option<_>>()
                .unwrap_or_default();
            prop_assert_eq!(timestamps.len(), ids.len());
            prop_assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        }
        prop_assert_eq!(counted, batch.len() as u64);
        prop_assert!(fx.logger.store().verify_integrity().is_ok());
    }

    #[test]
    fn rejection_leaves_state_unchanged(
        prefix in prop::collection::vec(any::<SubmissionParams>(), 0..10),
        params: SubmissionParams,
        which in any::<u8>(),
    ) {
        let mut fx = fixture();
        let ctx = fx.caller_ctx();
        for p in &prefix {
            let submission = submission_from_params(p, &fx.oracle, NOW);
            prop_assert!(fx.logger.submit(&ctx, submission).is_ok());
        }

        let store_before = fx.logger.store().clone();
        let transfers_before = fx.logger.transfer().transfers().len();

        let (bad, expected) = corrupt(submission_from_params(&params, &fx.oracle, NOW), which);
        prop_assert_eq!(fx.logger.submit(&ctx, bad), Err(expected));

        prop_assert_eq!(fx.logger.store(), &store_before);
        prop_assert_eq!(fx.logger.transfer().transfers().len(), transfers_before);
    }

    #[test]
    fn verify_batch_holds_for_any_ids(
        count in 0usize..8,
        ids in prop::collection::vec(0u64..20, 0..12),
    ) {
        let mut fx = fixture();
        for i in 0..count {
            fx.submit(1, NOW + i as u64).unwrap();
        }

        let ids: Vec<StreamId> = ids.into_iter().map(StreamId::new).collect();
        prop_assert!(fx.logger.verify_batch(&ids));
    }
}
