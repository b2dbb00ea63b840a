//! Signing configuration.
//!
//! Signer and verifier must agree on the bucket size and algorithm out of
//! band; nothing here is carried in the URL.
//!
//! # Example
//!
//! ```ignore
//! use url_signing::{HashAlgorithm, SigningConfigBuilder};
//! use std::time::Duration;
//!
//! let config = SigningConfigBuilder::new()
//!     .bucket_size(Duration::from_secs(300))
//!     .algorithm(HashAlgorithm::Sha256)
//!     .build();
//! ```

use crate::domain::algorithm::HashAlgorithm;
use crate::domain::entities::{BucketSize, Secret, SecretDiagnostics};
use crate::domain::errors::UnknownAlgorithm;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the bucket width in seconds.
pub const ENV_BUCKET_SECS: &str = "URLSIGN_BUCKET_SECS";

/// Environment variable holding the HMAC algorithm name.
pub const ENV_HMAC_ALGORITHM: &str = "URLSIGN_HMAC_ALGORITHM";

/// Default environment variable holding the shared secret.
pub const ENV_SECRET: &str = "URLSIGN_SECRET";

/// Default bucket width.
pub const DEFAULT_BUCKET_SECS: u64 = 60;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Shared secret not set: {0}")]
    MissingSecret(String),

    #[error("Invalid bucket size: {0}")]
    InvalidBucketSize(String),

    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
}

/// Agreed signing parameters.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Width of one time bucket
    #[serde_as(as = "DurationSeconds<u64>")]
    pub bucket_size: Duration,
    /// HMAC primitive for both derivation and token layers
    pub algorithm: HashAlgorithm,
    /// Whether debug logs may carry key material
    #[serde(default)]
    pub secret_diagnostics: SecretDiagnostics,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            bucket_size: Duration::from_secs(DEFAULT_BUCKET_SECS),
            algorithm: HashAlgorithm::Sha1,
            secret_diagnostics: SecretDiagnostics::Redacted,
        }
    }
}

impl SigningConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `URLSIGN_BUCKET_SECS`: Bucket width in seconds (default: 60)
    /// - `URLSIGN_HMAC_ALGORITHM`: `sha1`, `sha256` or `sha512` (default: sha1)
    ///
    /// Secret diagnostics are never enabled from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BUCKET_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidBucketSize(format!("{raw:?}: {e}")))?;
            config.bucket_size = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_HMAC_ALGORITHM) {
            config.algorithm = raw.parse()?;
        }

        Ok(config)
    }

    /// Bucket width as a domain value.
    pub fn bucket(&self) -> BucketSize {
        BucketSize::new(self.bucket_size)
    }

    /// Builder-style method to set the bucket size
    pub fn with_bucket_size(mut self, bucket_size: Duration) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Builder-style method to set the algorithm
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder-style method to set secret diagnostics
    pub fn with_secret_diagnostics(mut self, diagnostics: SecretDiagnostics) -> Self {
        self.secret_diagnostics = diagnostics;
        self
    }
}

/// Builder for [`SigningConfig`].
#[derive(Default)]
pub struct SigningConfigBuilder {
    bucket_size: Option<Duration>,
    algorithm: Option<HashAlgorithm>,
    secret_diagnostics: Option<SecretDiagnostics>,
}

impl SigningConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bucket width
    pub fn bucket_size(mut self, bucket_size: Duration) -> Self {
        self.bucket_size = Some(bucket_size);
        self
    }

    /// Set the bucket width in seconds
    pub fn bucket_secs(self, secs: u64) -> Self {
        self.bucket_size(Duration::from_secs(secs))
    }

    /// Set the HMAC algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Allow bucket keys and expected tokens in debug logs.
    ///
    /// For local debugging only.
    pub fn expose_secrets_in_logs(mut self) -> Self {
        self.secret_diagnostics = Some(SecretDiagnostics::Exposed);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SigningConfig {
        let default = SigningConfig::default();
        SigningConfig {
            bucket_size: self.bucket_size.unwrap_or(default.bucket_size),
            algorithm: self.algorithm.unwrap_or(default.algorithm),
            secret_diagnostics: self
                .secret_diagnostics
                .unwrap_or(default.secret_diagnostics),
        }
    }
}

impl Secret {
    /// Load the shared secret from the environment variable `var`.
    ///
    /// The variable's UTF-8 bytes are the secret. Empty values are accepted.
    pub fn from_env(var: &str) -> Result<Self, ConfigError> {
        env::var(var)
            .map(|value| Secret::new(value.into_bytes()))
            .map_err(|_| ConfigError::MissingSecret(var.to_string()))
    }

    /// Load the shared secret from `URLSIGN_SECRET`.
    pub fn from_default_env() -> Result<Self, ConfigError> {
        Self::from_env(ENV_SECRET)
    }
}
