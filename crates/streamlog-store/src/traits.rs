//! RecordStore trait: the abstract interface for stream record storage.
//!
//! The store owns the record lifecycle: the primary id → record mapping, the
//! amendment audit entries, the per-content event counter and the time index.
//! The logger validates first and only then calls the mutating methods, so
//! implementations never see an invalid record.

use streamlog_core::{ContentId, Stream, StreamId, StreamUpdate};

/// Maximum ids returned by a range query.
pub const RANGE_QUERY_LIMIT: usize = 100;

/// Storage for committed stream records and their secondary indices.
///
/// # Design Notes
///
/// - **Append-only**: there is no delete. Records are only ever appended, and
///   only `duration` is ever rewritten.
/// - **Dense ids**: `append_stream` assigns `next_stream_id()` and then
///   advances it by exactly one.
/// - **Infallible**: mutations are applied in full. A backend that can fail
///   must do so before the logger reaches the commit step.
pub trait RecordStore {
    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// The id the next appended record will receive. Equals the record count.
    fn next_stream_id(&self) -> StreamId;

    /// Get a record by id.
    fn get_stream(&self, id: StreamId) -> Option<Stream>;

    /// Whether a record exists at `id`.
    fn has_stream(&self, id: StreamId) -> bool {
        id < self.next_stream_id()
    }

    /// Commit a record.
    ///
    /// Allocates the id, stores the record, increments the content's event
    /// count and appends the id to its `(content_id, timestamp)` bucket.
    fn append_stream(&mut self, stream: Stream) -> StreamId;

    /// Overwrite a record's duration and replace its audit entry.
    ///
    /// Returns `false` if there is no record at `id`.
    fn amend_duration(&mut self, id: StreamId, update: StreamUpdate) -> bool;

    /// The most recent amendment of a record, if any.
    fn get_update(&self, id: StreamId) -> Option<StreamUpdate>;

    // ─────────────────────────────────────────────────────────────────────────
    // Index Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Committed events for a content id.
    fn event_count(&self, content_id: ContentId) -> u64;

    /// The ids in one time bucket, oldest first.
    fn bucket(&self, content_id: ContentId, timestamp: u64) -> Vec<StreamId>;

    /// Ids of a content's events with `start <= timestamp <= end`.
    ///
    /// Buckets are concatenated in ascending timestamp order and the result is
    /// truncated to [`RANGE_QUERY_LIMIT`]. An empty or inverted range yields
    /// nothing.
    fn streams_in_range(&self, content_id: ContentId, start: u64, end: u64) -> Vec<StreamId>;
}
