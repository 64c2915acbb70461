//! Cryptographic seam for oracle attestation.
//!
//! The validation pipeline only ever sees two narrow interfaces:
//! [`MessageHasher`] turns the canonical oracle message into a [`Digest`], and
//! [`SignatureVerifier`] checks an [`OracleSignature`] over that digest with
//! the configured [`OraclePublicKey`]. Production wiring uses SHA-256 and
//! Ed25519; tests may substitute deterministic stubs.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 32-byte message digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The oracle's 32-byte Ed25519 public key.
///
/// The default key is all-zero, which verifies nothing.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OraclePublicKey(pub [u8; 32]);

impl OraclePublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The unset key.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for OraclePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OracleKey({})", &self.to_hex()[..16])
    }
}

impl From<[u8; 32]> for OraclePublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte oracle signature over a [`Digest`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OracleSignature(pub [u8; 64]);

impl OracleSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The zero signature (never valid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for OracleSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OracleSig({}...)", &self.to_hex()[..16])
    }
}

impl From<[u8; 64]> for OracleSignature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for OracleSignature {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 64] = slice.try_into()?;
        Ok(Self(arr))
    }
}

// serde only derives arrays up to 32 elements.
impl Serialize for OracleSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for OracleSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = OracleSignature;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("64 signature bytes")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                OracleSignature::try_from(v).map_err(|_| E::invalid_length(v.len(), &self))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut arr = [0u8; 64];
                for (i, byte) in arr.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                Ok(OracleSignature(arr))
            }
        }

        deserializer.deserialize_bytes(SignatureVisitor)
    }
}

/// Deterministic cryptographic digest over the canonical oracle message.
pub trait MessageHasher {
    /// Compute the digest of `message`.
    fn digest(&self, message: &[u8]) -> Digest;
}

/// Signature predicate over a digest and a fixed-size public key.
pub trait SignatureVerifier {
    /// Whether `signature` is a valid signature of `digest` under `key`.
    fn verify(&self, digest: &Digest, signature: &OracleSignature, key: &OraclePublicKey) -> bool;
}

/// SHA-256 digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl MessageHasher for Sha256Hasher {
    fn digest(&self, message: &[u8]) -> Digest {
        let hash = <sha2::Sha256 as sha2::Digest>::digest(message);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Digest(out)
    }
}

/// Blake3 digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl MessageHasher for Blake3Hasher {
    fn digest(&self, message: &[u8]) -> Digest {
        Digest(*blake3::hash(message).as_bytes())
    }
}

/// Ed25519 verification of a signature over the raw digest bytes.
///
/// Uses strict verification, so small-order keys (including the all-zero
/// default) never verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, digest: &Digest, signature: &OracleSignature, key: &OraclePublicKey) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&key.0) else {
            return false;
        };
        let sig = Signature::from_bytes(&signature.0);
        verifying_key.verify_strict(digest.as_bytes(), &sig).is_ok()
    }
}

/// The oracle's signing key.
///
/// The log never holds one of these; it exists for oracle tooling and tests.
#[derive(Clone)]
pub struct OracleKeypair {
    signing_key: SigningKey,
}

impl OracleKeypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the public key.
    pub fn public_key(&self) -> OraclePublicKey {
        OraclePublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a digest.
    pub fn sign_digest(&self, digest: &Digest) -> OracleSignature {
        let sig = self.signing_key.sign(digest.as_bytes());
        OracleSignature(sig.to_bytes())
    }
}

impl fmt::Debug for OracleKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OracleKeypair({:?})", self.public_key())
    }
}
