//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the two identifiers the hashing registry
//! is built on. Each is a distinct type — you cannot pass a [`ClassName`]
//! where a [`VersionToken`] is expected.
//!
//! ## Validation
//!
//! Both types validate at construction time. Serde deserialization goes
//! through the same constructors (`try_from`), so a manifest read from disk
//! cannot smuggle in malformed identifiers.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A fully-qualified class name participating in a hash unit.
///
/// Format: dot-separated non-empty segments of `[A-Za-z0-9_$]`, e.g.
/// `io.provenance.scope.contract.TestJavaContracts$TestJavaContract`.
/// The `$` form names a nested class. Ordering is lexicographic on the
/// qualified name, which is what gives hash-unit inputs their
/// deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Create a class name from a string, validating format.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .split('.')
                .all(|segment| !segment.is_empty() && segment.chars().all(is_identifier_char));
        if !valid {
            return Err(ValidationError::InvalidClassName(name));
        }
        Ok(Self(name))
    }

    /// The qualified name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClassName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

/// An opaque, globally-unique version identifier binding a hash unit to an
/// external release record.
///
/// Observed in the wild as numeric timestamp-like strings (e.g.
/// `"1631912511583"`), but the registry never parses a token for meaning —
/// it is a lookup key and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionToken(String);

impl VersionToken {
    /// Create a version token from a string, validating it is non-empty
    /// and free of whitespace.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidVersionToken(token));
        }
        Ok(Self(token))
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VersionToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionToken> for String {
    fn from(token: VersionToken) -> Self {
        token.0
    }
}
