//! # Domain Entities
//!
//! Core value types for URL signing: the shared secret, bucket size and
//! index, the transient bucket key, and the transmitted token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Name of the query parameter carrying the token.
pub const TOKEN_PARAM: &str = "token";

// =============================================================================
// Secret material
// =============================================================================

/// Long-lived secret shared out of band between signer and verifier.
///
/// Any length is accepted, including empty. The bytes are wiped on drop and
/// never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Create from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {}])", self.0.len())
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Bucket-scoped key: `HMAC(secret, be64(bucket_index))`.
///
/// Exists only for the duration of a generate or validate call.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BucketKey(Vec<u8>);

impl BucketKey {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketKey([REDACTED; {}])", self.0.len())
    }
}

// =============================================================================
// Time quantization
// =============================================================================

/// Width of one time bucket, agreed out of band.
///
/// A zero width is accepted and maps every instant to bucket 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketSize(Duration);

impl BucketSize {
    /// Create from a duration.
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Create from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// The underlying duration.
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Width in nanoseconds.
    pub fn as_nanos(&self) -> i128 {
        self.0.as_nanos() as i128
    }

    /// Index of the bucket containing `unix_nanos`.
    pub fn index_of(&self, unix_nanos: i128) -> BucketIndex {
        BucketIndex::from_unix_nanos(unix_nanos, *self)
    }
}

impl From<Duration> for BucketSize {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

/// Discrete time bucket: `unix_nanos / bucket_nanos`, truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketIndex(pub i64);

impl BucketIndex {
    /// Quantize a nanosecond timestamp into a bucket index.
    pub fn from_unix_nanos(unix_nanos: i128, size: BucketSize) -> Self {
        let width = size.as_nanos();
        if width == 0 {
            return Self(0);
        }
        Self((unix_nanos / width) as i64)
    }

    /// Fixed-width big-endian encoding, the input to key derivation.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for BucketIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed nanoseconds since the Unix epoch. Instants before the epoch are
/// negative.
pub fn unix_nanos(instant: SystemTime) -> i128 {
    match instant.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}

// =============================================================================
// Token
// =============================================================================

/// Lower-case hex encoding of `HMAC(bucket_key, canonical_payload)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Hex-encode raw MAC output.
    pub fn from_mac(mac: &[u8]) -> Self {
        Self(hex::encode(mac))
    }

    /// The hex string as carried in the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Constant-time comparison against a token taken from a URL.
    ///
    /// Comparison is over the exact strings; an upper-case rendering of the
    /// right MAC does not match.
    pub fn matches(&self, claimed: &str) -> bool {
        self.0.as_bytes().ct_eq(claimed.as_bytes()).into()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Diagnostics capability
// =============================================================================

/// Whether debug logs may carry bucket keys and expected tokens.
///
/// `Exposed` leaks key material to whoever can read the logs. It must only be
/// enabled in code, for local debugging, never from untrusted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretDiagnostics {
    /// Only non-sensitive fields are logged
    #[default]
    Redacted,
    /// Bucket keys and expected tokens are logged at debug level
    Exposed,
}

impl SecretDiagnostics {
    /// Returns true if sensitive values may be logged.
    pub fn is_exposed(&self) -> bool {
        matches!(self, Self::Exposed)
    }
}
