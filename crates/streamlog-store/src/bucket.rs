//! Time index bucket: the stream ids sharing one `(content_id, timestamp)`.
//!
//! A bucket holds at most [`TIME_BUCKET_CAPACITY`] ids in commit order. When
//! full, pushing a new id evicts the oldest.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use streamlog_core::StreamId;

/// Maximum ids retained per bucket.
pub const TIME_BUCKET_CAPACITY: usize = 100;

/// Fixed-capacity, drop-oldest sequence of stream ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    ids: VecDeque<StreamId>,
}

impl TimeBucket {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self {
            ids: VecDeque::with_capacity(TIME_BUCKET_CAPACITY),
        }
    }

    /// Append an id, returning the evicted oldest id if the bucket was full.
    pub fn push(&mut self, id: StreamId) -> Option<StreamId> {
        self.ids.push_back(id);
        if self.ids.len() > TIME_BUCKET_CAPACITY {
            self.ids.pop_front()
        } else {
            None
        }
    }

    /// Ids in commit order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = StreamId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Copy out as a vector, oldest first.
    pub fn to_vec(&self) -> Vec<StreamId> {
        self.ids.iter().copied().collect()
    }
}
