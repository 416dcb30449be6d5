//! # Hash-Unit Digest Computation
//!
//! Combines the canonical bytes of every class in a hash unit into a single
//! SHA-256 digest.
//!
//! ## Determinism Invariant
//!
//! The input is a `BTreeMap` keyed by [`ClassName`], so iteration order is
//! lexicographic by qualified name. The nondeterminism hazard of feeding an
//! unordered map into a hasher cannot be expressed through this signature.
//!
//! ## Boundary Framing
//!
//! Each class contributes a frame of
//! `len(name) ++ name ++ len(content) ++ content` (lengths as big-endian
//! u64). Without the length prefixes, the class sets `{"AB": c}` and
//! `{"A": "B" ++ c}` would concatenate to identical hasher input.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use covenant_core::{CanonicalBytes, CanonicalizationError, ClassBytesSource, ClassName, ContentDigest};

/// Compute the digest of a hash unit from the canonical bytes of its
/// classes, combined in lexicographic name order.
///
/// Pure function: identical input maps always yield identical digests, and
/// any single-byte change to any class's representation changes the result.
pub fn compute_unit_digest(classes: &BTreeMap<ClassName, CanonicalBytes>) -> ContentDigest {
    let mut hasher = Sha256::new();
    for (name, bytes) in classes {
        update_frame(&mut hasher, name, bytes);
    }
    finalize(hasher)
}

/// Compute the digest of a single class's canonical bytes.
///
/// Uses the same boundary framing as [`compute_unit_digest`], so the digest
/// of one class equals the digest of a unit containing only that class.
/// Registries retain these per-class digests to attribute which class
/// diverged when a whole-unit comparison fails.
pub fn compute_class_digest(name: &ClassName, bytes: &CanonicalBytes) -> ContentDigest {
    let mut hasher = Sha256::new();
    update_frame(&mut hasher, name, bytes);
    finalize(hasher)
}

/// Pull the canonical bytes for each named class out of a
/// [`ClassBytesSource`], failing fast on the first class the source cannot
/// produce.
///
/// No partial result is returned: a digest over a subset of the requested
/// classes would be a digest of something else entirely.
pub fn collect_unit_bytes<'a>(
    source: &impl ClassBytesSource,
    classes: impl IntoIterator<Item = &'a ClassName>,
) -> Result<BTreeMap<ClassName, CanonicalBytes>, CanonicalizationError> {
    let mut collected = BTreeMap::new();
    for class in classes {
        let bytes = source.canonical_bytes(class)?;
        collected.insert(class.clone(), bytes);
    }
    Ok(collected)
}

fn update_frame(hasher: &mut Sha256, name: &ClassName, bytes: &CanonicalBytes) {
    let name_bytes = name.as_str().as_bytes();
    hasher.update((name_bytes.len() as u64).to_be_bytes());
    hasher.update(name_bytes);
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes.as_bytes());
}

fn finalize(hasher: Sha256) -> ContentDigest {
    let hash = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::sha256(bytes)
}
