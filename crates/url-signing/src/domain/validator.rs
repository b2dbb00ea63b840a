//! # Signature Validation
//!
//! Accepts a signed URL if its token matches the one computed for the
//! reference instant's bucket or either neighbour. Checking the bucket
//! before and after tolerates clock skew and requests that straddle a
//! boundary, so a token stays valid for roughly three bucket widths.
//!
//! ## Security Notes
//!
//! - Every failure collapses to `false`; the caller never learns why.
//! - Token comparison is constant-time (`subtle`).
//! - Replay within the window is not prevented.

use super::algorithm::{HashAlgorithm, KeyedHash};
use super::canonical::SignedUrl;
use super::entities::{unix_nanos, BucketSize, SecretDiagnostics};
use super::errors::Rejection;
use super::token::TokenGenerator;
use std::time::SystemTime;
use tracing::debug;

/// Validates signed URLs against a three-bucket window.
#[derive(Debug, Clone, Default)]
pub struct SignatureValidator<H: KeyedHash = HashAlgorithm> {
    generator: TokenGenerator<H>,
}

impl<H: KeyedHash> SignatureValidator<H> {
    /// Create a validator using `hash` for both HMAC layers.
    pub fn new(hash: H) -> Self {
        Self {
            generator: TokenGenerator::new(hash),
        }
    }

    /// Allow or forbid logging of bucket keys and expected tokens.
    pub fn with_diagnostics(mut self, diagnostics: SecretDiagnostics) -> Self {
        self.generator = self.generator.with_diagnostics(diagnostics);
        self
    }

    /// The underlying generator.
    pub fn generator(&self) -> &TokenGenerator<H> {
        &self.generator
    }

    /// Returns true if `signed_url` carries a token issued for its path and
    /// parameters within one bucket of `reference`.
    ///
    /// Never panics on caller input: malformed URLs and missing tokens are
    /// plain rejections.
    pub fn is_valid_signature(
        &self,
        secret: &[u8],
        bucket_size: BucketSize,
        reference: SystemTime,
        signed_url: &str,
    ) -> bool {
        match self.check(secret, bucket_size, reference, signed_url) {
            Ok(()) => true,
            Err(rejection) => {
                debug!(reason = %rejection, "Rejected signed URL");
                false
            }
        }
    }

    fn check(
        &self,
        secret: &[u8],
        bucket_size: BucketSize,
        reference: SystemTime,
        signed_url: &str,
    ) -> Result<(), Rejection> {
        let signed = SignedUrl::parse(signed_url).map_err(|e| {
            debug!(error = %e, "Unparseable URL in signature validation");
            Rejection::MalformedUrl
        })?;

        let claimed = signed.token().ok_or(Rejection::MissingToken)?;
        let payload = signed.payload().as_bytes();
        let exposed = self.generator.deriver().diagnostics().is_exposed();

        // Current bucket first, then previous, then next
        let reference = unix_nanos(reference);
        let width = bucket_size.as_nanos();
        let window = [reference, reference - width, reference + width];

        for candidate in window {
            let expected = self
                .generator
                .generate_at_nanos(secret, bucket_size, candidate, payload);

            if exposed {
                debug!(
                    target: "url_signing::secrets",
                    bucket_index = bucket_size.index_of(candidate).0,
                    expected_token = %expected,
                    "Expected token"
                );
            }

            if expected.matches(claimed) {
                return Ok(());
            }
        }

        Err(Rejection::TokenMismatch)
    }
}

/// Validate a signed URL using HMAC-SHA1.
pub fn is_valid_signature(
    secret: &[u8],
    bucket_size: BucketSize,
    reference: SystemTime,
    signed_url: &str,
) -> bool {
    SignatureValidator::new(HashAlgorithm::Sha1).is_valid_signature(
        secret,
        bucket_size,
        reference,
        signed_url,
    )
}
