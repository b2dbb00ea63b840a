//! # Keyed Hash Primitives
//!
//! The HMAC primitive shared by both layers of the scheme (bucket key
//! derivation and token computation). It is passed in as a value, so
//! callers choose the algorithm per deriver/generator/validator instead of
//! through process-wide state.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

use super::errors::UnknownAlgorithm;

/// A keyed MAC used for both bucket key derivation and token computation.
///
/// Implementations must be pure: the same key and data always yield the
/// same output, and any key length is accepted.
pub trait KeyedHash: Send + Sync {
    /// Compute the MAC of `data` under `key`.
    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8>;

    /// Output length in bytes.
    fn output_size(&self) -> usize;

    /// Short human readable name, used in logs.
    fn name(&self) -> &'static str;
}

impl<T: KeyedHash + ?Sized> KeyedHash for &T {
    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        (**self).mac(key, data)
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// HMAC algorithms supported out of the box.
///
/// `Sha1` is the default. HMAC-SHA1 remains sound as a MAC despite the
/// collision attacks on SHA-1 itself. Tokens interoperate with signers that
/// use the same construction only while the path carries no dot segments:
/// `.`, `..` and their `%2e` forms are resolved before signing, so
/// `/a/../b` is signed as `/b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// HMAC-SHA1 (20-byte output, 40 hex chars)
    #[default]
    Sha1,
    /// HMAC-SHA256 (32-byte output, 64 hex chars)
    Sha256,
    /// HMAC-SHA512 (64-byte output, 128 hex chars)
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];
}

impl KeyedHash for HashAlgorithm {
    fn mac(&self, key: &[u8], data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => hmac_digest::<Hmac<Sha1>>(key, data),
            Self::Sha256 => hmac_digest::<Hmac<Sha256>>(key, data),
            Self::Sha512 => hmac_digest::<Hmac<Sha512>>(key, data),
        }
    }

    fn output_size(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "hmac-sha1",
            Self::Sha256 => "hmac-sha256",
            Self::Sha512 => "hmac-sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let bare = normalized
            .strip_prefix("hmac-")
            .unwrap_or(&normalized)
            .replace('-', "");

        match bare.as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

fn hmac_digest<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <M as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
