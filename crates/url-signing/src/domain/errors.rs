//! # Signing Errors
//!
//! Error types for URL signing operations.
//!
//! Validation never surfaces these to its caller: every failure collapses to
//! `false` at the validation boundary. The [`Rejection`] kind exists only so
//! the validator can log why it said no.

use thiserror::Error;

/// Errors raised on the generation side.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UrlSigningError {
    /// The URL could not be parsed
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// The URL handed to the signer already carries a `token` parameter
    #[error("URL already contains a token parameter")]
    TokenAlreadyPresent,
}

/// Why a signed URL was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Rejection {
    /// The signed URL could not be parsed
    #[error("unparseable URL")]
    MalformedUrl,

    /// No `token` query parameter was present
    #[error("missing token parameter")]
    MissingToken,

    /// No bucket in the validity window produced the claimed token
    #[error("token mismatch")]
    TokenMismatch,
}

/// Unrecognized HMAC algorithm name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown HMAC algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);
