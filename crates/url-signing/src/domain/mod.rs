//! # Domain Layer
//!
//! Pure signing logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.
//!
//! - `algorithm`: injected HMAC primitive
//! - `bucket`: secret + bucket index -> bucket key
//! - `token`: bucket key + canonical payload -> token
//! - `canonical`: URL -> canonical payload + claimed token
//! - `validator`: three-bucket window check

pub mod algorithm;
pub mod bucket;
pub mod canonical;
pub mod entities;
pub mod errors;
pub mod token;
pub mod validator;
