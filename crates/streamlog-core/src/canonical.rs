//! Canonical oracle message.
//!
//! The oracle attests to `(content_id, performer_id, timestamp)` by signing the
//! digest of:
//!
//! ```text
//! decimal(content_id) || performer_id bytes || decimal(timestamp)
//! ```
//!
//! There are no separators or length prefixes. Any implementation that signs
//! or verifies oracle attestations must reproduce these bytes exactly.

use crate::crypto::{Digest, MessageHasher};
use crate::types::{ContentId, Principal};

/// Build the canonical message the oracle signs.
pub fn oracle_message(content_id: ContentId, performer_id: &Principal, timestamp: u64) -> Vec<u8> {
    let content = content_id.get().to_string();
    let ts = timestamp.to_string();

    let mut buf = Vec::with_capacity(content.len() + performer_id.as_bytes().len() + ts.len());
    buf.extend_from_slice(content.as_bytes());
    buf.extend_from_slice(performer_id.as_bytes());
    buf.extend_from_slice(ts.as_bytes());
    buf
}

/// Digest of the canonical oracle message.
pub fn oracle_digest<H: MessageHasher + ?Sized>(
    hasher: &H,
    content_id: ContentId,
    performer_id: &Principal,
    timestamp: u64,
) -> Digest {
    hasher.digest(&oracle_message(content_id, performer_id, timestamp))
}
