//! # URL Signing
//!
//! Time-bucketed HMAC signatures over a URL's path and query parameters.
//! One service issues a signed URL; another, sharing only the secret and
//! the bucket size, checks it without any stored state.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure signing logic, no I/O
//! - **Ports Layer** (`ports/`): `UrlSigningApi` inbound, `Clock` outbound
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//! - **Config** (`config.rs`): Agreed parameters, environment loading
//!
//! ## Scheme
//!
//! ```text
//! bucket_index = unix_nanos / bucket_nanos
//! bucket_key   = HMAC(secret, be64(bucket_index))
//! payload      = path + "?" + join(sort(["k=v", ...]), "&")
//! token        = hex(HMAC(bucket_key, payload))
//! ```
//!
//! A token validates in the reference bucket and both neighbours.
//!
//! ## Security Notes
//!
//! - Scheme, host and fragment are not signed
//! - Replay within the acceptance window is not prevented
//! - Validation outcome is a bare `bool`; reasons only reach debug logs
//! - Secrets and bucket keys are zeroized on drop

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{ConfigError, SigningConfig, SigningConfigBuilder};
pub use domain::algorithm::{HashAlgorithm, KeyedHash};
pub use domain::bucket::{derive_bucket_key, BucketKeyDeriver};
pub use domain::canonical::{CanonicalPayload, SignedUrl};
pub use domain::entities::{
    unix_nanos, BucketIndex, BucketKey, BucketSize, Secret, SecretDiagnostics, Token, TOKEN_PARAM,
};
pub use domain::errors::{Rejection, UnknownAlgorithm, UrlSigningError};
pub use domain::token::{generate_token, generate_url_token, TokenGenerator};
pub use domain::validator::{is_valid_signature, SignatureValidator};
pub use ports::inbound::UrlSigningApi;
pub use ports::outbound::{Clock, FixedClock, SystemClock};
pub use service::UrlSigningService;
