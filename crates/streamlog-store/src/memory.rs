//! In-memory implementation of the RecordStore trait.
//!
//! Records live in a vector indexed by stream id, which makes id density
//! structural. Secondary indices are ordered maps so that snapshots encode
//! deterministically and range queries walk buckets in timestamp order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use streamlog_core::validation::RATE_LIMIT;
use streamlog_core::{ContentId, Stream, StreamId, StreamUpdate};

use crate::bucket::{TimeBucket, TIME_BUCKET_CAPACITY};
use crate::error::{Result, StoreError};
use crate::traits::{RecordStore, RANGE_QUERY_LIMIT};

/// In-memory record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Records indexed by stream id.
    streams: Vec<Stream>,

    /// Latest amendment per stream id.
    updates: BTreeMap<StreamId, StreamUpdate>,

    /// Committed events per content id.
    content_counts: BTreeMap<ContentId, u64>,

    /// Time index: (content_id, timestamp) -> bucket of stream ids.
    time_index: BTreeMap<(ContentId, u64), TimeBucket>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Check that the secondary indices agree with the records.
    ///
    /// The per-content counts and the time index are rebuilt from the records
    /// and compared; every audit entry must refer to an existing record whose
    /// duration it matches.
    pub fn verify_integrity(&self) -> Result<()> {
        let mut counts: BTreeMap<ContentId, u64> = BTreeMap::new();
        let mut index: BTreeMap<(ContentId, u64), TimeBucket> = BTreeMap::new();

        for (i, stream) in self.streams.iter().enumerate() {
            let id = StreamId::new(i as u64);
            if !stream.status {
                return Err(StoreError::Integrity(format!("stream {id} is not committed")));
            }
            *counts.entry(stream.content_id).or_insert(0) += 1;
            index
                .entry((stream.content_id, stream.timestamp))
                .or_default()
                .push(id);
        }

        if let Some((content_id, count)) = counts.iter().find(|(_, c)| **c > RATE_LIMIT) {
            return Err(StoreError::Integrity(format!(
                "content {content_id} has {count} events, above the rate limit"
            )));
        }
        if counts != self.content_counts {
            return Err(StoreError::Integrity("content counts do not match records".into()));
        }
        if index.len() != self.time_index.len()
            || index
                .iter()
                .zip(self.time_index.iter())
                .any(|((ka, a), (kb, b))| ka != kb || a.to_vec() != b.to_vec())
        {
            return Err(StoreError::Integrity("time index does not match records".into()));
        }
        if let Some((key, bucket)) = self
            .time_index
            .iter()
            .find(|(_, b)| b.len() > TIME_BUCKET_CAPACITY)
        {
            return Err(StoreError::Integrity(format!(
                "bucket {key:?} holds {} ids",
                bucket.len()
            )));
        }

        for (id, update) in &self.updates {
            let stream = self
                .streams
                .get(id.get() as usize)
                .ok_or_else(|| StoreError::Integrity(format!("update for missing stream {id}")))?;
            if stream.duration != update.update_duration {
                return Err(StoreError::Integrity(format!(
                    "stream {id} duration {} disagrees with its update {}",
                    stream.duration, update.update_duration
                )));
            }
            if stream.performer_id != update.updater {
                return Err(StoreError::Integrity(format!(
                    "stream {id} was amended by someone other than its performer"
                )));
            }
        }

        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn next_stream_id(&self) -> StreamId {
        StreamId::new(self.streams.len() as u64)
    }

    fn get_stream(&self, id: StreamId) -> Option<Stream> {
        self.streams.get(id.get() as usize).cloned()
    }

    fn append_stream(&mut self, stream: Stream) -> StreamId {
        let id = self.next_stream_id();
        let content_id = stream.content_id;
        let timestamp = stream.timestamp;

        self.streams.push(stream);
        *self.content_counts.entry(content_id).or_insert(0) += 1;

        let bucket = self.time_index.entry((content_id, timestamp)).or_default();
        if let Some(evicted) = bucket.push(id) {
            tracing::debug!(
                content_id = content_id.get(),
                timestamp,
                evicted = evicted.get(),
                "time bucket full, evicted oldest id"
            );
        }

        id
    }

    fn amend_duration(&mut self, id: StreamId, update: StreamUpdate) -> bool {
        let Some(stream) = self.streams.get_mut(id.get() as usize) else {
            return false;
        };
        stream.duration = update.update_duration;
        self.updates.insert(id, update);
        true
    }

    fn get_update(&self, id: StreamId) -> Option<StreamUpdate> {
        self.updates.get(&id).cloned()
    }

    fn event_count(&self, content_id: ContentId) -> u64 {
        self.content_counts.get(&content_id).copied().unwrap_or(0)
    }

    fn bucket(&self, content_id: ContentId, timestamp: u64) -> Vec<StreamId> {
        self.time_index
            .get(&(content_id, timestamp))
            .map(TimeBucket::to_vec)
            .unwrap_or_default()
    }

    fn streams_in_range(&self, content_id: ContentId, start: u64, end: u64) -> Vec<StreamId> {
        if start > end {
            return Vec::new();
        }

        self.time_index
            .range((content_id, start)..=(content_id, end))
            .flat_map(|(_, bucket)| bucket.iter())
            .take(RANGE_QUERY_LIMIT)
            .collect()
    }
}
