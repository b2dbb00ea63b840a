//! # Token Generation
//!
//! `token = hex(HMAC(bucket_key, canonical_payload))`, where the bucket key
//! comes from [`BucketKeyDeriver`] for the bucket containing the instant.

use super::algorithm::{HashAlgorithm, KeyedHash};
use super::bucket::BucketKeyDeriver;
use super::canonical::SignedUrl;
use super::entities::{unix_nanos, BucketIndex, BucketSize, SecretDiagnostics, Token};
use super::errors::UrlSigningError;
use std::time::SystemTime;

/// Generates time-bucketed tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenGenerator<H: KeyedHash = HashAlgorithm> {
    deriver: BucketKeyDeriver<H>,
}

impl<H: KeyedHash> TokenGenerator<H> {
    /// Create a generator using `hash` for both HMAC layers.
    pub fn new(hash: H) -> Self {
        Self {
            deriver: BucketKeyDeriver::new(hash),
        }
    }

    /// Allow or forbid logging of bucket keys.
    pub fn with_diagnostics(mut self, diagnostics: SecretDiagnostics) -> Self {
        self.deriver = self.deriver.with_diagnostics(diagnostics);
        self
    }

    /// The underlying key deriver.
    pub fn deriver(&self) -> &BucketKeyDeriver<H> {
        &self.deriver
    }

    /// Token for `payload` in the bucket containing `instant`.
    ///
    /// `payload` is signed verbatim; use [`generate_for_url`](Self::generate_for_url)
    /// to sign a URL.
    pub fn generate(
        &self,
        secret: &[u8],
        bucket_size: BucketSize,
        instant: SystemTime,
        payload: impl AsRef<[u8]>,
    ) -> Token {
        self.generate_at_nanos(secret, bucket_size, unix_nanos(instant), payload.as_ref())
    }

    /// Token for the canonical form of `url` in the bucket containing `instant`.
    ///
    /// Any `token` parameter already on the URL is ignored, and the result is
    /// the same for every ordering of the query parameters.
    ///
    /// # Errors
    ///
    /// `UrlSigningError::MalformedUrl` if `url` cannot be parsed.
    pub fn generate_for_url(
        &self,
        secret: &[u8],
        bucket_size: BucketSize,
        instant: SystemTime,
        url: &str,
    ) -> Result<Token, UrlSigningError> {
        let signed = SignedUrl::parse(url)?;
        Ok(self.generate(secret, bucket_size, instant, signed.payload()))
    }

    pub(crate) fn generate_at_nanos(
        &self,
        secret: &[u8],
        bucket_size: BucketSize,
        unix_nanos: i128,
        payload: &[u8],
    ) -> Token {
        self.generate_in_bucket(secret, bucket_size.index_of(unix_nanos), payload)
    }

    /// Token for `payload` in an explicit bucket.
    pub fn generate_in_bucket(
        &self,
        secret: &[u8],
        bucket_index: BucketIndex,
        payload: impl AsRef<[u8]>,
    ) -> Token {
        let bucket_key = self.deriver.derive(secret, bucket_index);
        let mac = self.deriver.hash().mac(bucket_key.as_bytes(), payload.as_ref());
        Token::from_mac(&mac)
    }
}

/// Token for a canonical payload using HMAC-SHA1.
pub fn generate_token(
    secret: &[u8],
    bucket_size: BucketSize,
    instant: SystemTime,
    payload: impl AsRef<[u8]>,
) -> Token {
    TokenGenerator::new(HashAlgorithm::Sha1).generate(secret, bucket_size, instant, payload)
}

/// Token for the canonical form of a URL using HMAC-SHA1.
pub fn generate_url_token(
    secret: &[u8],
    bucket_size: BucketSize,
    instant: SystemTime,
    url: &str,
) -> Result<Token, UrlSigningError> {
    TokenGenerator::new(HashAlgorithm::Sha1).generate_for_url(secret, bucket_size, instant, url)
}
