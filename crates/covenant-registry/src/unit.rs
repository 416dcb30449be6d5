//! # Hash Units
//!
//! A hash unit is the minimal set of class definitions hashed together to
//! represent one versioned artifact: a business-logic contract or its
//! protocol message definitions. Each released version of a contract ships
//! one contract unit and one proto unit sharing a version token.
//!
//! [`HashUnit`] is immutable once constructed; the registry never rewrites
//! an entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use covenant_core::{
    CanonicalBytes, CanonicalizationError, ClassBytesSource, ClassName, DigestString, VersionToken,
};
use covenant_hash::{collect_unit_bytes, compute_class_digest, compute_unit_digest};

/// Which side of a released artifact a hash unit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashUnitKind {
    /// Business-logic contract classes.
    Contract,
    /// Protocol-buffer message classes the contract consumes and produces.
    Proto,
}

impl std::fmt::Display for HashUnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contract => write!(f, "contract"),
            Self::Proto => write!(f, "proto"),
        }
    }
}

/// One class participating in a hash unit, with its matching policy.
///
/// `required` classes are digested and must be present at verification
/// time. Advisory (`required = false`) classes are tracked for
/// informational and compatibility purposes only: they are excluded from
/// the digest and never block verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMembership {
    /// The fully-qualified class name.
    pub class: ClassName,
    /// Whether the class must match exactly at verification time.
    pub required: bool,
}

impl ClassMembership {
    /// A membership that must match exactly.
    pub fn required(class: ClassName) -> Self {
        Self {
            class,
            required: true,
        }
    }

    /// A membership tracked for information only.
    pub fn advisory(class: ClassName) -> Self {
        Self {
            class,
            required: false,
        }
    }
}

/// An immutable registry entry binding a version token to the digest of a
/// named class set.
///
/// The `classes` map is keyed by qualified name (unique within the unit by
/// construction) with the per-class required flag as value — the same
/// shape the original release records carry. `class_digests` optionally
/// retains a digest per required class so a verification mismatch can be
/// attributed to the classes that diverged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashUnit {
    kind: HashUnitKind,
    id: VersionToken,
    classes: BTreeMap<ClassName, bool>,
    digest: DigestString,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    class_digests: BTreeMap<ClassName, DigestString>,
}

impl HashUnit {
    /// Assemble a unit from an externally computed digest.
    ///
    /// Used when loading release records that carry only the whole-unit
    /// digest. Memberships naming the same class collapse to the last
    /// entry.
    pub fn new(
        kind: HashUnitKind,
        id: VersionToken,
        memberships: impl IntoIterator<Item = ClassMembership>,
        digest: DigestString,
    ) -> Self {
        let classes = memberships
            .into_iter()
            .map(|m| (m.class, m.required))
            .collect();
        Self {
            kind,
            id,
            classes,
            digest,
            class_digests: BTreeMap::new(),
        }
    }

    /// Compute a unit from the canonical bytes of its classes.
    ///
    /// This is the write path, executed once per contract version at
    /// registration time. Every required class must have bytes in `bytes`;
    /// advisory classes are tracked but never digested. Per-class digests
    /// are retained for later mismatch attribution.
    pub fn compute(
        kind: HashUnitKind,
        id: VersionToken,
        memberships: impl IntoIterator<Item = ClassMembership>,
        bytes: &BTreeMap<ClassName, CanonicalBytes>,
    ) -> Result<Self, CanonicalizationError> {
        let classes: BTreeMap<ClassName, bool> = memberships
            .into_iter()
            .map(|m| (m.class, m.required))
            .collect();

        let mut required_bytes = BTreeMap::new();
        let mut class_digests = BTreeMap::new();
        for (class, required) in &classes {
            if !required {
                continue;
            }
            let canonical = bytes.get(class).ok_or_else(|| {
                CanonicalizationError::SourceUnavailable {
                    class: class.as_str().to_string(),
                    reason: "no canonical bytes supplied at registration".to_string(),
                }
            })?;
            class_digests.insert(
                class.clone(),
                compute_class_digest(class, canonical).to_digest_string(),
            );
            required_bytes.insert(class.clone(), canonical.clone());
        }

        let digest = compute_unit_digest(&required_bytes).to_digest_string();
        Ok(Self {
            kind,
            id,
            classes,
            digest,
            class_digests,
        })
    }

    /// Compute a unit by pulling class bytes from an extractor.
    ///
    /// Convenience over [`HashUnit::compute`] wiring in the byte-extractor
    /// collaborator; extraction failure for any required class propagates
    /// immediately.
    pub fn from_source(
        kind: HashUnitKind,
        id: VersionToken,
        memberships: Vec<ClassMembership>,
        source: &impl ClassBytesSource,
    ) -> Result<Self, CanonicalizationError> {
        let required: Vec<&ClassName> = memberships
            .iter()
            .filter(|m| m.required)
            .map(|m| &m.class)
            .collect();
        let bytes = collect_unit_bytes(source, required)?;
        Self::compute(kind, id, memberships, &bytes)
    }

    /// The side of the artifact this unit covers.
    pub fn kind(&self) -> HashUnitKind {
        self.kind
    }

    /// The version token this unit is registered under.
    pub fn id(&self) -> &VersionToken {
        &self.id
    }

    /// The recorded whole-unit digest.
    pub fn digest(&self) -> &DigestString {
        &self.digest
    }

    /// All tracked classes with their required flags, ordered by name.
    pub fn classes(&self) -> &BTreeMap<ClassName, bool> {
        &self.classes
    }

    /// The retained per-class digests, empty when the unit was assembled
    /// from a bare whole-unit digest.
    pub fn class_digests(&self) -> &BTreeMap<ClassName, DigestString> {
        &self.class_digests
    }

    /// The classes that must match exactly, in lexicographic order.
    pub fn required_classes(&self) -> impl Iterator<Item = &ClassName> {
        self.classes
            .iter()
            .filter(|(_, required)| **required)
            .map(|(class, _)| class)
    }

    /// The classes tracked for information only, in lexicographic order.
    pub fn advisory_classes(&self) -> impl Iterator<Item = &ClassName> {
        self.classes
            .iter()
            .filter(|(_, required)| !**required)
            .map(|(class, _)| class)
    }

    /// Whether `class` is tracked by this unit with `required = true`.
    pub fn is_required(&self, class: &ClassName) -> bool {
        self.classes.get(class).copied().unwrap_or(false)
    }

    /// Whether `class` is tracked by this unit at all.
    pub fn tracks(&self, class: &ClassName) -> bool {
        self.classes.contains_key(class)
    }
}
