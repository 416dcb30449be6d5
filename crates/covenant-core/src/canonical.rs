//! # Canonical Byte Representations
//!
//! [`CanonicalBytes`] is the sole admission path for bytes used in digest
//! computation. The canonical representation of a class — its structure,
//! method signatures, annotations, field layout, stripped of incidental
//! artifacts — is produced by an external collaborator behind the
//! [`ClassBytesSource`] trait; this module guards what that collaborator
//! hands over.
//!
//! ## Invariant
//!
//! The inner `Vec<u8>` is private and the only constructor rejects empty
//! input. A digest over an empty placeholder can therefore not be expressed
//! in the type system.

use std::collections::BTreeMap;

use crate::error::CanonicalizationError;
use crate::identity::ClassName;

/// The canonical byte representation of a single class definition.
///
/// Construction is only possible through [`CanonicalBytes::new`], which
/// rejects empty input with [`CanonicalizationError::EmptyRepresentation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Wrap the canonical bytes the extractor produced for `class`.
    ///
    /// Fails if the representation is empty — an extractor that produced
    /// nothing has failed, and that failure must propagate rather than be
    /// hashed away.
    pub fn new(
        class: &ClassName,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, CanonicalizationError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CanonicalizationError::EmptyRepresentation(
                class.as_str().to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The length of the canonical representation in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false — empty representations are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The byte-extractor collaborator boundary.
///
/// Implementations resolve a class name to its canonical byte
/// representation. The contract-authoring side of the platform provides the
/// production implementation; [`MapSource`] serves embedded and test use.
pub trait ClassBytesSource {
    /// Produce the canonical bytes for `class`.
    ///
    /// Implementations must signal failure — class not found, artifact
    /// unreadable — rather than return placeholder content.
    fn canonical_bytes(&self, class: &ClassName) -> Result<CanonicalBytes, CanonicalizationError>;
}

/// An in-memory [`ClassBytesSource`] over a fixed set of classes.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    classes: BTreeMap<ClassName, CanonicalBytes>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class and its canonical bytes, replacing any previous entry.
    pub fn insert(
        &mut self,
        class: ClassName,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<(), CanonicalizationError> {
        let canonical = CanonicalBytes::new(&class, bytes)?;
        self.classes.insert(class, canonical);
        Ok(())
    }

    /// The class names this source can resolve, in lexicographic order.
    pub fn class_names(&self) -> impl Iterator<Item = &ClassName> {
        self.classes.keys()
    }
}

impl ClassBytesSource for MapSource {
    fn canonical_bytes(&self, class: &ClassName) -> Result<CanonicalBytes, CanonicalizationError> {
        self.classes
            .get(class)
            .cloned()
            .ok_or_else(|| CanonicalizationError::SourceUnavailable {
                class: class.as_str().to_string(),
                reason: "class not present in source".to_string(),
            })
    }
}
