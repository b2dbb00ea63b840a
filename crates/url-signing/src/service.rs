//! # URL Signing Service
//!
//! Application service that implements the `UrlSigningApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`UrlSigningApi`)
//! - Reads the current instant through the outbound port (`Clock`)
//! - Delegates derivation, canonicalization and comparison to the domain layer

use crate::config::{ConfigError, SigningConfig};
use crate::domain::algorithm::HashAlgorithm;
use crate::domain::canonical::SignedUrl;
use crate::domain::entities::{Secret, Token, TOKEN_PARAM};
use crate::domain::errors::UrlSigningError;
use crate::domain::validator::SignatureValidator;
use crate::ports::inbound::UrlSigningApi;
use crate::ports::outbound::{Clock, SystemClock};
use std::time::SystemTime;
use tracing::{debug, info};

/// URL Signing Service.
///
/// Holds the shared secret and the agreed parameters. One instance can
/// both issue and verify; in a two-party setup each side builds its own
/// from the same secret and [`SigningConfig`].
pub struct UrlSigningService<C: Clock = SystemClock> {
    secret: Secret,
    config: SigningConfig,
    validator: SignatureValidator<HashAlgorithm>,
    clock: C,
}

impl UrlSigningService<SystemClock> {
    /// Create a service reading the system clock.
    pub fn new(secret: Secret, config: SigningConfig) -> Self {
        Self::with_clock(secret, config, SystemClock)
    }

    /// Create a service from `URLSIGN_SECRET` and the signing environment
    /// variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = Secret::from_default_env()?;
        let config = SigningConfig::from_env()?;
        Ok(Self::new(secret, config))
    }
}

impl<C: Clock> UrlSigningService<C> {
    /// Create a service with an explicit clock.
    pub fn with_clock(secret: Secret, config: SigningConfig, clock: C) -> Self {
        let validator = SignatureValidator::new(config.algorithm)
            .with_diagnostics(config.secret_diagnostics);

        info!(
            algorithm = %config.algorithm,
            bucket_secs = config.bucket_size.as_secs(),
            secret_diagnostics = ?config.secret_diagnostics,
            "URL signing service initialized"
        );

        Self {
            secret,
            config,
            validator,
            clock,
        }
    }

    /// The agreed parameters.
    pub fn config(&self) -> &SigningConfig {
        &self.config
    }
}

impl<C: Clock> UrlSigningApi for UrlSigningService<C> {
    fn generate_token(&self, url: &str) -> Result<Token, UrlSigningError> {
        self.generate_token_at(url, self.clock.now())
    }

    fn generate_token_at(&self, url: &str, instant: SystemTime) -> Result<Token, UrlSigningError> {
        self.validator.generator().generate_for_url(
            self.secret.as_bytes(),
            self.config.bucket(),
            instant,
            url,
        )
    }

    fn sign_url(&self, url: &str) -> Result<String, UrlSigningError> {
        self.sign_url_at(url, self.clock.now())
    }

    fn sign_url_at(&self, url: &str, instant: SystemTime) -> Result<String, UrlSigningError> {
        let parsed = SignedUrl::parse(url)?;
        if parsed.has_token() {
            return Err(UrlSigningError::TokenAlreadyPresent);
        }

        let token = self.validator.generator().generate(
            self.secret.as_bytes(),
            self.config.bucket(),
            instant,
            parsed.payload(),
        );

        debug!(payload = %parsed.payload(), "Signed URL");
        Ok(append_token(url, &token))
    }

    fn is_valid_signature(&self, signed_url: &str) -> bool {
        self.is_valid_signature_at(signed_url, self.clock.now())
    }

    fn is_valid_signature_at(&self, signed_url: &str, reference: SystemTime) -> bool {
        self.validator.is_valid_signature(
            self.secret.as_bytes(),
            self.config.bucket(),
            reference,
            signed_url,
        )
    }
}

/// Append `token=<hex>` to the query, ahead of any fragment.
fn append_token(url: &str, token: &Token) -> String {
    let (head, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };

    let separator = match head.find('?') {
        None => "?",
        Some(_) if head.ends_with('?') || head.ends_with('&') => "",
        Some(_) => "&",
    };

    let mut signed = format!("{head}{separator}{TOKEN_PARAM}={token}");
    if let Some(fragment) = fragment {
        signed.push('#');
        signed.push_str(fragment);
    }
    signed
}
