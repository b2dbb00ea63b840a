//! # Signing Telemetry
//!
//! Log subscriber setup for services that issue or verify signed URLs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signing_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `url-signing` | Service name on every event |
//! | `URLSIGN_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `URLSIGN_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `URLSIGN_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//!
//! Bucket keys and expected tokens are logged under the
//! `url_signing::secrets` target, and only when the signing config opts in.
//! A filter such as `info,url_signing::secrets=off` silences them even then.

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}
