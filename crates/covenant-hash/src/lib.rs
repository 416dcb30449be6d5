//! # covenant-hash — Content Hashing for Hash Units
//!
//! Implements the Content Hasher of the Covenant platform: the pure
//! function that turns an ordered set of canonical class representations
//! into the single digest recorded in a hash-unit registry entry.
//!
//! The input type does the heavy lifting. Digests are computed from
//! `BTreeMap<ClassName, CanonicalBytes>` — ordering is therefore always
//! lexicographic by qualified class name, and every byte sequence passed
//! through [`CanonicalBytes`](covenant_core::CanonicalBytes) was admitted
//! by its non-empty constructor.

pub mod unit;

// Re-export primary entry points.
pub use unit::{collect_unit_bytes, compute_class_digest, compute_unit_digest};
