//! # covenant-core — Foundational Types for the Covenant Platform
//!
//! Covenant runs contract logic off-chain; any party holding the same
//! contract code must be able to re-derive and verify its results. This
//! crate defines the type-system primitives that the hashing and
//! verification layers are built on. Every other crate in the workspace
//! depends on `covenant-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`ClassName`] and
//!    [`VersionToken`] are validated newtypes. No bare strings for
//!    identifiers.
//!
//! 2. **[`CanonicalBytes`] is the only admissible hashing input.** Its
//!    constructor rejects empty representations, so an extractor failure
//!    cannot be silently hashed as a placeholder.
//!
//! 3. **Digests carry their algorithm.** [`ContentDigest`] pairs the raw
//!    32 bytes with a [`DigestAlgorithm`] tag; [`DigestString`] is the
//!    lossless, fixed-width base64 form recorded in registry entries, and
//!    parsing admits only the canonical encoding.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `covenant-*` crates (this is the leaf of the
//!   DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, ClassBytesSource, MapSource};
pub use digest::{ContentDigest, DigestAlgorithm, DigestString};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{ClassName, VersionToken};
