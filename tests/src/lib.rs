//! # URL Signing Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── exploits/         # Attack simulations
//! │   ├── forgery.rs    # Producing tokens without the secret
//! │   ├── tamper.rs     # Altering signed URLs
//! │   └── replay.rs     # Abusing the acceptance window
//! │
//! └── integration/      # Issuer and verifier as separate services
//!     ├── flows.rs
//!     └── environment.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p url-signing-tests
//!
//! # By category
//! cargo test -p url-signing-tests integration::
//! cargo test -p url-signing-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p url-signing-tests
//! ```
