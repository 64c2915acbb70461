//! # Stream Log Testkit
//!
//! Testing utilities for the stream log.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: canonical oracle messages and their SHA-256 digests
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: a ready-governed logger with a known oracle key
//! - **Stubs**: signature verifiers that accept or reject everything
//!
//! ## Golden Vectors
//!
//! ```rust
//! use streamlog_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, digest) in verify_all_vectors() {
//!     assert!(matches, "{name}: {digest}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use streamlog_testkit::generators::{submission_from_params, SubmissionParams};
//!
//! proptest! {
//!     #[test]
//!     fn valid_submissions_commit(params: SubmissionParams) {
//!         let mut fixture = TestFixture::with_seed([1; 32]);
//!         let submission = submission_from_params(&params, &fixture.oracle, fixture.now);
//!         prop_assert!(fixture.logger.submit(&fixture.caller_ctx(), submission).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use streamlog_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::with_seed([1; 32]);
//! let id = fixture.submit(1, 10).unwrap();
//! assert!(fixture.logger.verify_batch(&[id]));
//! ```

pub mod fixtures;
pub mod generators;
pub mod stubs;
pub mod vectors;

pub use fixtures::{TestFixture, AUTHORITY, CALLER, PERFORMER};
pub use generators::{submission_from_params, SubmissionParams};
pub use stubs::{AcceptAllVerifier, RejectAllVerifier};
pub use vectors::{all_vectors, verify_all_vectors, vectors_json, GoldenVector};
