//! Error types for the stream log.
//!
//! Every rejected transition is reported as a [`LogError`]. Each variant maps
//! to a stable numeric code (see [`LogError::code`]) so that callers on the
//! other side of a wire boundary can classify failures without string matching.

use thiserror::Error;

use crate::types::StreamId;

/// Classified, recoverable failure of a stream log operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("authority is already set")]
    AuthorityAlreadySet,

    #[error("authority is not set")]
    AuthorityNotSet,

    #[error("caller is not authorized")]
    NotAuthorized,

    #[error("content id must be positive")]
    InvalidContentId,

    #[error("performer id is the reserved burn identity")]
    InvalidPerformerId,

    #[error("geo region {0} is out of range")]
    InvalidGeoRegion(u32),

    #[error("device type {0} is out of range")]
    InvalidDeviceType(u8),

    #[error("timestamp {timestamp} is outside [{now}, {now} + window]")]
    InvalidTimestamp { timestamp: u64, now: u64 },

    #[error("engagement type {0} is out of range")]
    InvalidEngagementType(u8),

    #[error("duration {0} is out of range")]
    InvalidDuration(u64),

    #[error("oracle signature verification failed")]
    InvalidOracleSignature,

    #[error("rate limit exceeded for content")]
    RateLimitExceeded,

    #[error("stream capacity exceeded")]
    CapacityExceeded,

    #[error("invalid log fee: {0}")]
    InvalidFee(i64),

    #[error("stream not found: {0}")]
    StreamNotFound(StreamId),

    /// The external fee transfer refused the payment; nothing was committed.
    #[error("fee transfer failed with code {code}")]
    TransferFailed { code: u32 },
}

impl LogError {
    /// Stable numeric code for this error.
    ///
    /// `AuthorityAlreadySet` and `AuthorityNotSet` share code 113.
    pub fn code(&self) -> u32 {
        match self {
            LogError::NotAuthorized => 100,
            LogError::InvalidContentId => 101,
            LogError::InvalidPerformerId => 102,
            LogError::InvalidGeoRegion(_) => 104,
            LogError::InvalidDeviceType(_) => 105,
            LogError::InvalidTimestamp { .. } => 106,
            LogError::InvalidOracleSignature => 107,
            LogError::RateLimitExceeded => 108,
            LogError::StreamNotFound(_) => 110,
            LogError::AuthorityNotSet | LogError::AuthorityAlreadySet => 113,
            LogError::InvalidFee(_) => 115,
            LogError::CapacityExceeded => 118,
            LogError::InvalidEngagementType(_) => 119,
            LogError::InvalidDuration(_) => 120,
            LogError::TransferFailed { code } => *code,
        }
    }
}

/// Result type for stream log operations.
pub type Result<T> = std::result::Result<T, LogError>;
