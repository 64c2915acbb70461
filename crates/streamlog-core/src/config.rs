//! Governance configuration.
//!
//! [`ConfigStore`] holds the authority identity, oracle key, per-event fee and
//! capacity ceiling. It is owned by the logger and mutated only through the
//! governance setters below. [`LoggerConfig`] supplies the initial values.

use serde::{Deserialize, Serialize};

use crate::crypto::OraclePublicKey;
use crate::error::{LogError, Result};
use crate::types::Principal;

/// Default capacity ceiling.
pub const DEFAULT_MAX_STREAMS: u64 = 1_000_000;

/// Default per-event fee.
pub const DEFAULT_LOG_FEE: u64 = 10;

/// Initial configuration for a new logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Initial capacity ceiling.
    pub max_streams: u64,
    /// Initial per-event fee.
    pub log_fee: u64,
    /// Initial oracle key.
    pub oracle_public_key: OraclePublicKey,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_streams: DEFAULT_MAX_STREAMS,
            log_fee: DEFAULT_LOG_FEE,
            oracle_public_key: OraclePublicKey::ZERO,
        }
    }
}

/// Singleton governance state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    authority: Option<Principal>,
    oracle_public_key: OraclePublicKey,
    log_fee: u64,
    max_streams: u64,
}

impl ConfigStore {
    /// Create with the given initial values and no authority.
    pub fn new(config: &LoggerConfig) -> Self {
        Self {
            authority: None,
            oracle_public_key: config.oracle_public_key,
            log_fee: config.log_fee,
            max_streams: config.max_streams,
        }
    }

    /// Set the authority. Succeeds exactly once.
    pub fn set_authority(&mut self, identity: Principal) -> Result<()> {
        if self.authority.is_some() {
            return Err(LogError::AuthorityAlreadySet);
        }
        self.authority = Some(identity);
        Ok(())
    }

    /// Replace the oracle key. Only the authority may do this.
    pub fn set_oracle_public_key(&mut self, caller: &Principal, key: OraclePublicKey) -> Result<()> {
        let authority = self.require_authority()?;
        if authority != caller {
            return Err(LogError::NotAuthorized);
        }
        self.oracle_public_key = key;
        Ok(())
    }

    /// Replace the per-event fee.
    pub fn set_log_fee(&mut self, fee: i64) -> Result<()> {
        self.require_authority()?;
        let fee = u64::try_from(fee).map_err(|_| LogError::InvalidFee(fee))?;
        self.log_fee = fee;
        Ok(())
    }

    /// Replace the capacity ceiling.
    ///
    /// A non-positive ceiling is reported as `NotAuthorized`, not as a
    /// dedicated validation error.
    pub fn set_max_streams(&mut self, max: i64) -> Result<()> {
        self.require_authority()?;
        if max <= 0 {
            return Err(LogError::NotAuthorized);
        }
        self.max_streams = max as u64;
        Ok(())
    }

    /// The authority, or `AuthorityNotSet`.
    pub fn require_authority(&self) -> Result<&Principal> {
        self.authority.as_ref().ok_or(LogError::AuthorityNotSet)
    }

    pub fn authority(&self) -> Option<&Principal> {
        self.authority.as_ref()
    }

    pub fn oracle_public_key(&self) -> &OraclePublicKey {
        &self.oracle_public_key
    }

    pub fn log_fee(&self) -> u64 {
        self.log_fee
    }

    pub fn max_streams(&self) -> u64 {
        self.max_streams
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(&LoggerConfig::default())
    }
}
