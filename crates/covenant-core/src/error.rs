//! # Error Hierarchy
//!
//! Structured error types for the Covenant foundation crate, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Canonicalization failures are fatal to the call that triggered them and
//! propagate immediately — a hash computed over a missing or empty class
//! representation would silently vouch for code that was never inspected.
//! Verification *outcomes* (mismatch, unknown version) are not errors; they
//! are returned as values by the registry crate.

use thiserror::Error;

/// Errors raised while obtaining the canonical byte representation of a
/// class definition.
///
/// These propagate up from the byte-extractor boundary through digest
/// computation and registration. None of them are retried: the underlying
/// class artifact will not repair itself.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The extractor produced an empty byte representation. An empty
    /// placeholder must never be hashed in place of real class content.
    #[error("empty canonical representation for class \"{0}\"")]
    EmptyRepresentation(String),

    /// The extractor could not load or canonicalize the class at all.
    #[error("unable to produce canonical bytes for class \"{class}\": {reason}")]
    SourceUnavailable {
        /// The qualified name of the class that could not be loaded.
        class: String,
        /// Collaborator-supplied description of the failure.
        reason: String,
    },
}

/// Validation errors for domain primitive newtypes.
///
/// Each identifier type enforces format constraints at construction time.
/// The invalid input is carried so misconfiguration can be diagnosed
/// without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Qualified class name is empty, has empty segments, or contains
    /// characters outside `[A-Za-z0-9_$.]`.
    #[error("invalid class name: \"{0}\" (expected a dot-separated qualified name)")]
    InvalidClassName(String),

    /// Version token is empty or contains whitespace.
    #[error("invalid version token: \"{0}\" (expected a non-empty opaque token)")]
    InvalidVersionToken(String),

    /// Digest string is not the base64 form of a 32-byte digest.
    #[error("invalid digest string: \"{value}\" ({reason})")]
    InvalidDigestString {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_representation_display_names_the_class() {
        let err = CanonicalizationError::EmptyRepresentation("com.example.Contract".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("empty canonical representation"));
        assert!(msg.contains("com.example.Contract"));
    }

    #[test]
    fn source_unavailable_display_carries_reason() {
        let err = CanonicalizationError::SourceUnavailable {
            class: "com.example.Contract".to_string(),
            reason: "artifact not found".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("com.example.Contract"));
        assert!(msg.contains("artifact not found"));
    }

    #[test]
    fn invalid_class_name_display() {
        let err = ValidationError::InvalidClassName("..".to_string());
        assert!(format!("{err}").contains(".."));
    }

    #[test]
    fn invalid_digest_string_display() {
        let err = ValidationError::InvalidDigestString {
            value: "not-base64!".to_string(),
            reason: "bad alphabet".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("not-base64!"));
        assert!(msg.contains("bad alphabet"));
    }
}
