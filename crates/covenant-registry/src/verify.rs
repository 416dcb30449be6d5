//! # Verification
//!
//! Recomputes a hash unit's digest from live class bytes and compares it
//! to the recorded entry. Runs before every contract invocation; a
//! non-[`Match`](VerificationResult::Match) verdict must block dispatch.
//!
//! Verification outcomes are values, not errors. A mismatch is a terminal,
//! reportable condition — the code on disk will not change by retrying —
//! and callers are forced to branch on every case.

use std::collections::BTreeMap;

use covenant_core::{CanonicalBytes, ClassName, VersionToken};
use covenant_hash::{compute_class_digest, compute_unit_digest};

use crate::unit::{HashUnit, HashUnitKind};

/// The verdict of verifying live class bytes against a registered unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a non-Match verdict must block contract dispatch"]
pub enum VerificationResult {
    /// The live class set reproduces the recorded digest exactly.
    Match,
    /// The recomputed digest differs from the recorded one.
    Mismatch {
        /// Best-effort attribution: required classes whose retained
        /// per-class digest disagrees with the live bytes, in
        /// lexicographic order. Empty when the unit retains no per-class
        /// digests.
        divergent: Vec<ClassName>,
    },
    /// A required class has no live bytes; nothing was digested.
    MissingRequiredClass {
        /// The first missing class in lexicographic order.
        class: ClassName,
    },
    /// No unit is registered under the claimed version token.
    UnknownVersion {
        /// The kind that was looked up.
        kind: HashUnitKind,
        /// The token that was looked up.
        id: VersionToken,
    },
}

impl VerificationResult {
    /// Whether the verdict permits dispatch.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl std::fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Mismatch { divergent } if divergent.is_empty() => write!(f, "mismatch"),
            Self::Mismatch { divergent } => {
                let names: Vec<&str> = divergent.iter().map(ClassName::as_str).collect();
                write!(f, "mismatch (divergent: {})", names.join(", "))
            }
            Self::MissingRequiredClass { class } => {
                write!(f, "missing required class {class}")
            }
            Self::UnknownVersion { kind, id } => {
                write!(f, "unknown {kind} version {id}")
            }
        }
    }
}

/// Verify live class bytes against a single registered unit.
///
/// Required classes are checked for presence before anything is digested —
/// no partial digest is ever computed. The digest is then recomputed over
/// the required subset only (advisory classes and any extra live classes
/// are ignored) and compared to the recorded digest string byte for byte.
pub fn verify_unit(
    unit: &HashUnit,
    live: &BTreeMap<ClassName, CanonicalBytes>,
) -> VerificationResult {
    for required in unit.required_classes() {
        if !live.contains_key(required) {
            return VerificationResult::MissingRequiredClass {
                class: required.clone(),
            };
        }
    }

    let restricted: BTreeMap<ClassName, CanonicalBytes> = live
        .iter()
        .filter(|(class, _)| unit.is_required(class))
        .map(|(class, bytes)| (class.clone(), bytes.clone()))
        .collect();

    let recomputed = compute_unit_digest(&restricted).to_digest_string();
    if recomputed == *unit.digest() {
        VerificationResult::Match
    } else {
        VerificationResult::Mismatch {
            divergent: divergent_classes(unit, &restricted),
        }
    }
}

/// Attribute a mismatch to individual classes via retained per-class
/// digests. Best-effort: returns an empty list when the unit has none.
fn divergent_classes(
    unit: &HashUnit,
    live: &BTreeMap<ClassName, CanonicalBytes>,
) -> Vec<ClassName> {
    unit.class_digests()
        .iter()
        .filter_map(|(class, recorded)| {
            let bytes = live.get(class)?;
            let recomputed = compute_class_digest(class, bytes).to_digest_string();
            (recomputed != *recorded).then(|| class.clone())
        })
        .collect()
}
