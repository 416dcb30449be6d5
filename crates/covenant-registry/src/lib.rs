//! # covenant-registry — Hash Unit Registry and Verification
//!
//! The integrity backbone of the Covenant platform. Each released contract
//! version is represented by immutable [`HashUnit`] entries binding a
//! version token to the digest of the classes that define it; before a
//! contract function is dispatched, the live code is verified against the
//! registered entry and any verdict other than
//! [`VerificationResult::Match`] blocks invocation.
//!
//! ## Lifecycle
//!
//! - **Write path** (once per release): canonical class bytes →
//!   [`HashUnit::compute`](unit::HashUnit::compute) → [`Registry::register`]
//!   → [`Manifest::save`](manifest::Manifest::save).
//! - **Read path** (before every invocation):
//!   [`Manifest::load`](manifest::Manifest::load) at startup →
//!   [`Registry::verify`] per call.
//!
//! The registry is populated single-threaded at startup and safely shared
//! (`Arc<Registry>`) across concurrent verification calls thereafter.

pub mod error;
pub mod manifest;
pub mod registry;
pub mod unit;
pub mod verify;

// Re-export primary types.
pub use error::RegistryError;
pub use manifest::{Manifest, MANIFEST_FORMAT_VERSION};
pub use registry::{Registered, Registry};
pub use unit::{ClassMembership, HashUnit, HashUnitKind};
pub use verify::{verify_unit, VerificationResult};
