//! # Stream Log Store
//!
//! Record storage for the stream log. Provides the [`RecordStore`] trait and
//! the in-memory [`MemoryStore`] backend.
//!
//! ## Overview
//!
//! The store keeps three views of the log:
//!
//! - the primary mapping from [`StreamId`](streamlog_core::StreamId) to
//!   [`Stream`](streamlog_core::Stream), plus one amendment audit entry per
//!   record
//! - a per-content event counter, used for rate limiting
//! - a time index of bounded [`TimeBucket`]s keyed by `(content_id, timestamp)`,
//!   used for range queries
//!
//! ## Usage
//!
//! ```rust
//! use streamlog_core::{ContentId, OracleSignature, Principal, Stream, SubmissionBuilder};
//! use streamlog_store::{MemoryStore, RecordStore};
//!
//! let mut store = MemoryStore::new();
//! let stream = Stream::committed(
//!     SubmissionBuilder::new(ContentId::new(1), Principal::new("ST3PERF"), 10)
//!         .duration(300)
//!         .signature(OracleSignature::ZERO),
//! );
//! let id = store.append_stream(stream);
//! assert_eq!(store.streams_in_range(ContentId::new(1), 0, 20), vec![id]);
//! ```
//!
//! ## Design Notes
//!
//! - **No validation here**: the store trusts its caller. All checks live in
//!   the logger's validation pipeline.
//! - **Snapshots**: [`MemoryStore`] encodes to versioned CBOR; restoring runs
//!   [`MemoryStore::verify_integrity`].

pub mod bucket;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;

pub use bucket::{TimeBucket, TIME_BUCKET_CAPACITY};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{decode_snapshot, encode_snapshot, SNAPSHOT_VERSION};
pub use traits::{RecordStore, RANGE_QUERY_LIMIT};
