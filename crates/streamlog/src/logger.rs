//! The StreamLogger: validated state transitions over the stream log.
//!
//! The logger owns the governance configuration, the record store and the
//! fee transfer. Every mutating call runs to completion against one view of
//! that state:
//!
//! - `submit`: validate, charge the fee, then commit. A rejected check or a
//!   failed transfer leaves everything untouched.
//! - `amend`: the performer rewrites a record's duration.
//! - governance setters: adjust fee, capacity and oracle key.

use streamlog_core::{
    validate_duration, validate_submission, ConfigStore, ContentId, Ed25519Verifier, LogError,
    LoggerConfig, MessageHasher, OraclePublicKey, Principal, Result, Sha256Hasher,
    SignatureVerifier, Stream, StreamId, StreamSubmission, StreamUpdate, SubmissionContext,
};
use streamlog_store::{MemoryStore, RecordStore};

use crate::context::CallContext;
use crate::transfer::FeeTransfer;

/// The stream log state machine.
///
/// Generic over the record store, the fee transfer, and the oracle crypto.
/// The defaults are an in-memory store with SHA-256 digests and Ed25519
/// signatures.
pub struct StreamLogger<T, S = MemoryStore, H = Sha256Hasher, V = Ed25519Verifier> {
    pub(crate) config: ConfigStore,
    pub(crate) store: S,
    pub(crate) transfer: T,
    pub(crate) hasher: H,
    pub(crate) verifier: V,
}

impl<T: FeeTransfer> StreamLogger<T> {
    /// Create a logger over an empty in-memory store.
    pub fn new(transfer: T, config: LoggerConfig) -> Self {
        Self::with_parts(
            MemoryStore::new(),
            transfer,
            Sha256Hasher,
            Ed25519Verifier,
            config,
        )
    }
}

impl<T, S, H, V> StreamLogger<T, S, H, V>
where
    T: FeeTransfer,
    S: RecordStore,
    H: MessageHasher,
    V: SignatureVerifier,
{
    /// Create a logger from explicit parts.
    pub fn with_parts(store: S, transfer: T, hasher: H, verifier: V, config: LoggerConfig) -> Self {
        Self {
            config: ConfigStore::new(&config),
            store,
            transfer,
            hasher,
            verifier,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Governance
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the authority. Only the first call succeeds.
    pub fn set_authority(&mut self, ctx: &CallContext, identity: Principal) -> Result<()> {
        self.config
            .set_authority(identity)
            .map_err(|e| rejected("set_authority", ctx, e))?;
        tracing::info!(
            caller = %ctx.caller,
            authority = %self.config.authority().map(Principal::as_str).unwrap_or_default(),
            "authority set"
        );
        Ok(())
    }

    /// Replace the oracle public key. Authority only.
    pub fn set_oracle_public_key(&mut self, ctx: &CallContext, key: OraclePublicKey) -> Result<()> {
        self.config
            .set_oracle_public_key(&ctx.caller, key)
            .map_err(|e| rejected("set_oracle_public_key", ctx, e))?;
        tracing::info!(caller = %ctx.caller, key = %key.to_hex(), "oracle key updated");
        Ok(())
    }

    /// Replace the per-event fee.
    pub fn set_log_fee(&mut self, ctx: &CallContext, fee: i64) -> Result<()> {
        self.config
            .set_log_fee(fee)
            .map_err(|e| rejected("set_log_fee", ctx, e))?;
        tracing::info!(caller = %ctx.caller, fee, "log fee updated");
        Ok(())
    }

    /// Replace the capacity ceiling.
    pub fn set_max_streams(&mut self, ctx: &CallContext, max: i64) -> Result<()> {
        self.config
            .set_max_streams(max)
            .map_err(|e| rejected("set_max_streams", ctx, e))?;
        tracing::info!(caller = %ctx.caller, max, "max streams updated");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Log a new stream event.
    ///
    /// Runs the validation pipeline, charges `log_fee` from the caller to the
    /// authority, and commits the record. Returns the new record's id, which
    /// is always the pre-call total.
    pub fn submit(&mut self, ctx: &CallContext, submission: StreamSubmission) -> Result<StreamId> {
        let validation = SubmissionContext {
            config: &self.config,
            now: ctx.now,
            next_stream_id: self.store.next_stream_id(),
            content_event_count: self.store.event_count(submission.content_id),
        };
        let recipient = validate_submission(&validation, &submission, &self.hasher, &self.verifier)
            .map_err(|e| rejected("submit", ctx, e))?
            .clone();

        let fee = self.config.log_fee();
        if let Err(e) = self.transfer.transfer(fee, &ctx.caller, &recipient) {
            tracing::warn!(
                caller = %ctx.caller,
                fee,
                error = %e,
                "fee transfer failed, submission aborted"
            );
            return Err(LogError::TransferFailed { code: e.code() });
        }

        let content_id = submission.content_id;
        let timestamp = submission.timestamp;
        let id = self.store.append_stream(Stream::committed(submission));

        tracing::info!(
            id = id.get(),
            content_id = content_id.get(),
            timestamp,
            caller = %ctx.caller,
            fee,
            "stream logged"
        );
        Ok(id)
    }

    /// Correct the duration of a logged stream. Performer only.
    ///
    /// Replaces the record's audit entry with `(now, new_duration, caller)`.
    pub fn amend(&mut self, ctx: &CallContext, id: StreamId, new_duration: u64) -> Result<()> {
        self.check_amend(ctx, id, new_duration)
            .map_err(|e| rejected("amend", ctx, e))?;

        let update = StreamUpdate {
            update_timestamp: ctx.now,
            update_duration: new_duration,
            updater: ctx.caller.clone(),
        };
        if !self.store.amend_duration(id, update) {
            return Err(rejected("amend", ctx, LogError::StreamNotFound(id)));
        }

        tracing::info!(id = id.get(), duration = new_duration, caller = %ctx.caller, "stream amended");
        Ok(())
    }

    fn check_amend(&self, ctx: &CallContext, id: StreamId, new_duration: u64) -> Result<()> {
        let stream = self
            .store
            .get_stream(id)
            .ok_or(LogError::StreamNotFound(id))?;
        if stream.performer_id != ctx.caller {
            return Err(LogError::NotAuthorized);
        }
        validate_duration(new_duration)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a record by id.
    pub fn get_stream(&self, id: StreamId) -> Option<Stream> {
        self.store.get_stream(id)
    }

    /// The most recent amendment of a record.
    pub fn get_stream_update(&self, id: StreamId) -> Option<StreamUpdate> {
        self.store.get_update(id)
    }

    /// Committed events for a content id.
    pub fn get_event_count(&self, content_id: ContentId) -> u64 {
        self.store.event_count(content_id)
    }

    /// Total records ever committed.
    pub fn get_total_streams(&self) -> u64 {
        self.store.next_stream_id().get()
    }

    /// Whether every existing record among `ids` is committed.
    ///
    /// Unknown ids are skipped. An empty batch verifies.
    pub fn verify_batch(&self, ids: &[StreamId]) -> bool {
        ids.iter()
            .filter_map(|&id| self.store.get_stream(id))
            .all(|stream| stream.status)
    }

    /// Ids of a content's events with `start <= timestamp <= end`, ascending
    /// by timestamp, at most 100.
    pub fn streams_in_range(&self, content_id: ContentId, start: u64, end: u64) -> Vec<StreamId> {
        self.store.streams_in_range(content_id, start, end)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Governance configuration.
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// The record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The fee transfer backend.
    pub fn transfer(&self) -> &T {
        &self.transfer
    }
}

fn rejected(op: &'static str, ctx: &CallContext, err: LogError) -> LogError {
    tracing::debug!(op, caller = %ctx.caller, code = err.code(), error = %err, "rejected");
    err
}
