//! # Bucket Key Derivation
//!
//! Turns the long-lived secret and a bucket index into a key that is only
//! good for that bucket. This is essentially RFC 6238 TOTP without the
//! truncation step: a leaked token exposes one bucket's derived key, not the
//! secret, and no per-bucket state has to be stored.

use super::algorithm::{HashAlgorithm, KeyedHash};
use super::entities::{BucketIndex, BucketKey, SecretDiagnostics};
use tracing::{debug, trace};

/// Derives bucket-scoped keys with an injected HMAC primitive.
#[derive(Debug, Clone, Default)]
pub struct BucketKeyDeriver<H: KeyedHash = HashAlgorithm> {
    hash: H,
    diagnostics: SecretDiagnostics,
}

impl<H: KeyedHash> BucketKeyDeriver<H> {
    /// Create a deriver using `hash` for the HMAC.
    pub fn new(hash: H) -> Self {
        Self {
            hash,
            diagnostics: SecretDiagnostics::Redacted,
        }
    }

    /// Allow or forbid logging of derived key material.
    pub fn with_diagnostics(mut self, diagnostics: SecretDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The HMAC primitive in use.
    pub fn hash(&self) -> &H {
        &self.hash
    }

    /// Current diagnostics capability.
    pub fn diagnostics(&self) -> SecretDiagnostics {
        self.diagnostics
    }

    /// `HMAC(secret, be64(bucket_index))`.
    ///
    /// Pure and infallible for any secret and any index.
    pub fn derive(&self, secret: &[u8], bucket_index: BucketIndex) -> BucketKey {
        let key = BucketKey::new(self.hash.mac(secret, &bucket_index.to_be_bytes()));

        if self.diagnostics.is_exposed() {
            debug!(
                target: "url_signing::secrets",
                bucket_index = bucket_index.0,
                algorithm = self.hash.name(),
                bucket_key = %hex::encode(key.as_bytes()),
                "Derived bucket key"
            );
        } else {
            trace!(
                bucket_index = bucket_index.0,
                algorithm = self.hash.name(),
                "Derived bucket key"
            );
        }

        key
    }
}

/// Derive a bucket key with the given primitive.
pub fn derive_bucket_key<H: KeyedHash>(
    hash: H,
    secret: &[u8],
    bucket_index: BucketIndex,
) -> BucketKey {
    BucketKeyDeriver::new(hash).derive(secret, bucket_index)
}
