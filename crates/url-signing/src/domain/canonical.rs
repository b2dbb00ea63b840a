//! # Canonical Payload
//!
//! Rebuilds the exact string that is signed from a URL:
//!
//! ```text
//! path + "?" + join(sort(["key=value", ...]), "&")
//! ```
//!
//! - Only the decoded path and query take part; scheme, host and fragment do not.
//! - The `token` parameter is excluded.
//! - Each key contributes its first value only; later repeats are ignored.
//! - Sorting is over the whole `key=value` string, not just the key.
//!
//! Signer and verifier both go through [`SignedUrl::parse`], so the payload
//! does not depend on the order the parameters were written in.

use super::entities::TOKEN_PARAM;
use super::errors::UrlSigningError;
use percent_encoding::percent_decode;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Origin used to resolve relative URLs such as `/resource?a=1`.
///
/// Only path and query are read from the result, so the value never
/// reaches the payload.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// The bytes that are actually signed.
///
/// Decoded bytes are kept as-is, so escapes that are not valid UTF-8
/// (`%ff`, `%c0`) stay distinct from one another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPayload(Vec<u8>);

impl CanonicalPayload {
    /// Assemble a payload from a decoded path and `key=value` parameters.
    ///
    /// `params` are sorted bytewise here; callers need not pre-sort them.
    pub fn assemble(path: &[u8], mut params: Vec<Vec<u8>>) -> Self {
        params.sort();
        let mut payload = path.to_vec();
        payload.push(b'?');
        payload.extend_from_slice(&params.join(&b'&'));
        Self(payload)
    }

    /// The payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The payload as text, with invalid UTF-8 replaced. For display only.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for CanonicalPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for CanonicalPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A URL split into its signed payload and the token it claims, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    payload: CanonicalPayload,
    token: Option<String>,
}

impl SignedUrl {
    /// Parse an absolute or origin-relative URL.
    ///
    /// # Errors
    ///
    /// `UrlSigningError::MalformedUrl` if the URL cannot be parsed or its
    /// path contains a malformed percent escape.
    pub fn parse(input: &str) -> Result<Self, UrlSigningError> {
        let base = Url::parse(PLACEHOLDER_ORIGIN)
            .map_err(|e| UrlSigningError::MalformedUrl(e.to_string()))?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(input)
            .map_err(|e| UrlSigningError::MalformedUrl(e.to_string()))?;

        let path = decode_path(url.path())?;

        let mut seen = HashSet::new();
        let mut token = None;
        let mut params = Vec::new();

        for (key, value) in query_pairs(url.query().unwrap_or("")) {
            if !seen.insert(key.clone()) {
                continue;
            }
            if key == TOKEN_PARAM.as_bytes() {
                token = Some(String::from_utf8_lossy(&value).into_owned());
            } else {
                let mut pair = key;
                pair.push(b'=');
                pair.extend_from_slice(&value);
                params.push(pair);
            }
        }

        Ok(Self {
            payload: CanonicalPayload::assemble(&path, params),
            token,
        })
    }

    /// The canonical payload (never includes the token).
    pub fn payload(&self) -> &CanonicalPayload {
        &self.payload
    }

    /// First value of the `token` parameter, if present.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns true if the URL carries a `token` parameter.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

/// Percent-decode a path, rejecting escapes that are not `%` + two hex digits.
fn decode_path(raw: &str) -> Result<Vec<u8>, UrlSigningError> {
    if !has_valid_escapes(raw) {
        return Err(UrlSigningError::MalformedUrl(format!(
            "invalid percent escape in path: {}",
            raw
        )));
    }
    Ok(percent_decode(raw.as_bytes()).collect())
}

/// Decoded query pairs in URL order.
///
/// Empty segments are skipped. Segments containing `;` or a malformed
/// percent escape are dropped rather than failing the whole URL.
fn query_pairs(raw: &str) -> impl Iterator<Item = (Vec<u8>, Vec<u8>)> + '_ {
    raw.split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(';'))
        .filter(|segment| has_valid_escapes(segment))
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (form_decode(key), form_decode(value))
        })
}

/// `+` is a space; everything else is percent-decoded to raw bytes.
fn form_decode(raw: &str) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
