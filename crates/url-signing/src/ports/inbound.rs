//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the signing subsystem, as seen by the service that
//! issues URLs and the service that later checks them.

use crate::domain::entities::Token;
use crate::domain::errors::UrlSigningError;
use std::time::SystemTime;

/// Primary URL signing API.
///
/// Implementations hold the shared secret, the agreed bucket size and the
/// HMAC algorithm, and must be thread-safe (`Send + Sync`).
pub trait UrlSigningApi: Send + Sync {
    // =========================================================================
    // Generation
    // =========================================================================

    /// Token for `url` in the current bucket.
    ///
    /// `url` should carry every parameter that is to be protected and no
    /// `token`; scheme and host are not covered.
    fn generate_token(&self, url: &str) -> Result<Token, UrlSigningError>;

    /// Token for `url` in the bucket containing `instant`.
    fn generate_token_at(&self, url: &str, instant: SystemTime) -> Result<Token, UrlSigningError>;

    /// `url` with a `token` parameter for the current bucket appended.
    ///
    /// # Errors
    /// * `UrlSigningError::MalformedUrl` - `url` cannot be parsed
    /// * `UrlSigningError::TokenAlreadyPresent` - `url` already has a `token`
    fn sign_url(&self, url: &str) -> Result<String, UrlSigningError>;

    /// `url` with a `token` parameter for the bucket containing `instant`.
    fn sign_url_at(&self, url: &str, instant: SystemTime) -> Result<String, UrlSigningError>;

    // =========================================================================
    // Validation
    // =========================================================================

    /// Returns true if `signed_url` validates against the current instant.
    fn is_valid_signature(&self, signed_url: &str) -> bool;

    /// Returns true if `signed_url` validates against `reference`.
    fn is_valid_signature_at(&self, signed_url: &str, reference: SystemTime) -> bool;
}
