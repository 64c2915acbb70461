//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur while encoding, decoding or checking a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot serialization error.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Snapshot deserialization error.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// Snapshot written by an incompatible version.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),

    /// Stored records and indices disagree.
    #[error("integrity violation: {0}")]
    Integrity(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
