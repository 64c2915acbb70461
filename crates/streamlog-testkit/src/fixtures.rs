//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Principals follow the usual
//! three-party scenario: a caller who pays, an authority who governs and
//! collects fees, and a performer named in the records.

use streamlog::{
    CallContext, ContentId, Ed25519Verifier, LoggerConfig, OracleKeypair, OraclePublicKey,
    Principal, Result, Sha256Hasher, SignatureVerifier, StreamId, StreamLogger, StreamSubmission,
    SubmissionBuilder, TransferLedger,
};
use streamlog_store::MemoryStore;

/// The submitting caller.
pub const CALLER: &str = "ST1TEST";

/// The governance authority and fee recipient.
pub const AUTHORITY: &str = "ST2TEST";

/// The performer named in fixture submissions.
pub const PERFORMER: &str = "ST3PERF";

/// Logger type used by fixtures.
pub type FixtureLogger<V> = StreamLogger<TransferLedger, MemoryStore, Sha256Hasher, V>;

/// A test fixture with an oracle keypair and a logger over an unmetered
/// ledger.
pub struct TestFixture<V = Ed25519Verifier> {
    pub oracle: OracleKeypair,
    pub logger: FixtureLogger<V>,
    /// Logical time used by the context helpers.
    pub now: u64,
}

impl TestFixture {
    /// Create a governed fixture with a random oracle key.
    pub fn new() -> Self {
        Self::governed(OracleKeypair::generate(), Ed25519Verifier)
    }

    /// Create a governed fixture with a deterministic oracle key.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::governed(OracleKeypair::from_seed(&seed), Ed25519Verifier)
    }

    /// Create a fixture with no authority.
    ///
    /// The oracle key is installed through [`LoggerConfig`], so signed
    /// submissions get as far as the authority check.
    pub fn ungoverned(seed: [u8; 32]) -> Self {
        let oracle = OracleKeypair::from_seed(&seed);
        let config = LoggerConfig {
            oracle_public_key: oracle.public_key(),
            ..LoggerConfig::default()
        };
        Self::from_parts(oracle, Ed25519Verifier, config)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SignatureVerifier> TestFixture<V> {
    /// Create a governed fixture with an explicit verifier.
    ///
    /// The authority is [`AUTHORITY`] and the oracle key is installed.
    pub fn governed(oracle: OracleKeypair, verifier: V) -> Self {
        let mut fixture = Self::from_parts(oracle, verifier, LoggerConfig::default());
        fixture
            .install_governance()
            .expect("fresh logger accepts governance");
        fixture
    }

    /// Create a fixture with the given config and no authority.
    pub fn from_parts(oracle: OracleKeypair, verifier: V, config: LoggerConfig) -> Self {
        let logger = StreamLogger::with_parts(
            MemoryStore::new(),
            TransferLedger::new(),
            Sha256Hasher,
            verifier,
            config,
        );
        Self {
            oracle,
            logger,
            now: 0,
        }
    }

    /// Set [`AUTHORITY`] and install the oracle key.
    pub fn install_governance(&mut self) -> Result<()> {
        let ctx = self.authority_ctx();
        self.logger.set_authority(&ctx, Principal::new(AUTHORITY))?;
        self.logger
            .set_oracle_public_key(&ctx, self.oracle.public_key())
    }

    /// The oracle's public key.
    pub fn oracle_key(&self) -> OraclePublicKey {
        self.oracle.public_key()
    }

    pub fn caller_ctx(&self) -> CallContext {
        CallContext::new(CALLER, self.now)
    }

    pub fn authority_ctx(&self) -> CallContext {
        CallContext::new(AUTHORITY, self.now)
    }

    pub fn performer_ctx(&self) -> CallContext {
        CallContext::new(PERFORMER, self.now)
    }

    /// A builder for a valid submission by [`PERFORMER`]: geo region 100,
    /// device type 1, engagement type 1, duration 300, no listener.
    pub fn builder(&self, content_id: u64, timestamp: u64) -> SubmissionBuilder {
        SubmissionBuilder::new(ContentId::new(content_id), Principal::new(PERFORMER), timestamp)
            .geo_region(100)
            .device_type(1)
            .engagement_type(1)
            .duration(300)
    }

    /// Sign a builder with the fixture's oracle.
    pub fn sign(&self, builder: SubmissionBuilder) -> StreamSubmission {
        builder.sign(&self.oracle, &Sha256Hasher)
    }

    /// A valid, signed submission.
    pub fn submission(&self, content_id: u64, timestamp: u64) -> StreamSubmission {
        self.sign(self.builder(content_id, timestamp))
    }

    /// Submit a valid event as [`CALLER`].
    pub fn submit(&mut self, content_id: u64, timestamp: u64) -> Result<StreamId> {
        let ctx = self.caller_ctx();
        let submission = self.submission(content_id, timestamp);
        self.logger.submit(&ctx, submission)
    }
}
