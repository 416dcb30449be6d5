//! # Content Digests
//!
//! Defines [`ContentDigest`] — the raw 32-byte digest with its algorithm
//! tag — and [`DigestString`], the fixed-width base64 rendering recorded in
//! hash-unit entries and manifests.
//!
//! The algorithm tag travels with the digest so verification code can
//! select the correct hash function if a successor algorithm is ever
//! introduced; every digest in the current format is SHA-256.
//!
//! ## Equality
//!
//! [`DigestString`] equality is byte-for-byte string comparison. Parsing
//! rejects any base64 form that does not re-encode to itself, so two equal
//! digests can never render as unequal strings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The hash algorithm used to compute a content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — the sole algorithm of the current format.
    Sha256,
}

/// A content digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a SHA-256 content digest from raw bytes.
    pub fn sha256(bytes: [u8; 32]) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256,
            bytes,
        }
    }

    /// Render the digest in its recorded string form.
    pub fn to_digest_string(&self) -> DigestString {
        DigestString(BASE64.encode(self.bytes))
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_digest_string())
    }
}

/// The fixed-width base64 rendering of a [`ContentDigest`].
///
/// This is the form that appears in registry entries and manifests, e.g.
/// `"bfkvcj/TeXCrhUZ4TJedRP2iIWRggsIg2PZ6gaRCUlg="`. The encoding is
/// lossless: [`DigestString::to_content_digest`] recovers the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigestString(String);

impl DigestString {
    /// Parse a digest string, validating that it is canonical base64 of a
    /// 32-byte digest.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let decoded = BASE64
            .decode(&value)
            .map_err(|e| ValidationError::InvalidDigestString {
                value: value.clone(),
                reason: e.to_string(),
            })?;
        if decoded.len() != 32 {
            return Err(ValidationError::InvalidDigestString {
                value,
                reason: format!("decoded to {} bytes, expected 32", decoded.len()),
            });
        }
        // Non-canonical encodings of the same bytes would defeat string
        // equality, so only the round-tripping form is admitted.
        if BASE64.encode(&decoded) != value {
            return Err(ValidationError::InvalidDigestString {
                value,
                reason: "non-canonical base64 encoding".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// The encoded digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the raw digest this string encodes.
    pub fn to_content_digest(&self) -> ContentDigest {
        // Construction guaranteed canonical base64 of exactly 32 bytes.
        let decoded = BASE64.decode(&self.0).unwrap_or_default();
        let mut bytes = [0u8; 32];
        for (dst, src) in bytes.iter_mut().zip(decoded) {
            *dst = src;
        }
        ContentDigest::sha256(bytes)
    }
}

impl std::fmt::Display for DigestString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DigestString {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<DigestString> for String {
    fn from(digest: DigestString) -> Self {
        digest.0
    }
}
