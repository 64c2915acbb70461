//! Golden test vectors for the canonical oracle message.
//!
//! An off-chain oracle must produce exactly these bytes and digests, or its
//! signatures will never verify. The vectors can be exported as JSON for
//! oracle implementations in other languages.

use serde::Serialize;
use streamlog_core::{oracle_digest, oracle_message, ContentId, Principal, Sha256Hasher};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub content_id: u64,
    pub performer_id: &'static str,
    pub timestamp: u64,
    /// Expected canonical message, as text.
    pub expected_message: &'static str,
    /// Expected SHA-256 of the message (hex).
    pub expected_sha256: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "basic submission",
            content_id: 1,
            performer_id: "ST3PERF",
            timestamp: 10,
            expected_message: "1ST3PERF10",
            expected_sha256: "1132b19103c610207e58832ff0e996245162ab5353898712c348d2251a09acaf",
        },
        GoldenVector {
            name: "realistic clock",
            content_id: 1000,
            performer_id: "ST2TEST",
            timestamp: 1_700_000_000,
            expected_message: "1000ST2TEST1700000000",
            expected_sha256: "f6dcde5a0cfd95ad5a6f9bb143db238dac2becbab419c840822bb7dc99fae93f",
        },
        GoldenVector {
            name: "zero timestamp",
            content_id: 7,
            performer_id: "ST3PERF",
            timestamp: 0,
            expected_message: "7ST3PERF0",
            expected_sha256: "840609367337424e9e44b803e124a30dc8110d1dd8038ea9b040ae77ee5bb7bb",
        },
        GoldenVector {
            name: "max integers",
            content_id: u64::MAX,
            performer_id: "ST3PERF",
            timestamp: u64::MAX,
            expected_message: "18446744073709551615ST3PERF18446744073709551615",
            expected_sha256: "549b9141ceba859ddc680ba58643334c8e9864820e1b44d54b36c8be78c83d60",
        },
        // Same bytes as the next vector: the message has no separators.
        GoldenVector {
            name: "ambiguous split, short content",
            content_id: 1,
            performer_id: "1ST3PERF",
            timestamp: 0,
            expected_message: "11ST3PERF0",
            expected_sha256: "fadc35b1c9c7865484428e767b06c1e7be8d84b4fd94647ba766f9a1ce6f5279",
        },
        GoldenVector {
            name: "ambiguous split, long content",
            content_id: 11,
            performer_id: "ST3PERF",
            timestamp: 0,
            expected_message: "11ST3PERF0",
            expected_sha256: "fadc35b1c9c7865484428e767b06c1e7be8d84b4fd94647ba766f9a1ce6f5279",
        },
    ]
}

/// Compute the canonical message and digest hex for a vector.
pub fn compute_vector(vector: &GoldenVector) -> (Vec<u8>, String) {
    let content_id = ContentId::new(vector.content_id);
    let performer = Principal::new(vector.performer_id);
    let message = oracle_message(content_id, &performer, vector.timestamp);
    let digest = oracle_digest(&Sha256Hasher, content_id, &performer, vector.timestamp);
    (message, digest.to_hex())
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, computed digest hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let (message, hex) = compute_vector(v);
            let matches = message == v.expected_message.as_bytes() && hex == v.expected_sha256;
            (v.name.to_string(), matches, hex)
        })
        .collect()
}

/// Export all vectors as pretty-printed JSON.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, hex) in verify_all_vectors() {
            assert!(matches, "Vector '{}' computed {}", name, hex);
        }
    }

    #[test]
    fn test_expected_digests_are_32_bytes() {
        for vector in all_vectors() {
            let bytes = hex::decode(vector.expected_sha256).unwrap();
            assert_eq!(bytes.len(), 32, "Vector '{}'", vector.name);
        }
    }

    #[test]
    fn test_json_export() {
        let json = vectors_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();

        assert_eq!(entries.len(), all_vectors().len());
        assert_eq!(entries[0]["expected_message"], "1ST3PERF10");
        assert_eq!(entries[3]["content_id"], u64::MAX);
    }
}
