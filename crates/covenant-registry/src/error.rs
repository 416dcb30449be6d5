//! # Registry Errors
//!
//! Failures of registration and manifest handling. Verification outcomes
//! are deliberately absent — they are values of
//! [`VerificationResult`](crate::verify::VerificationResult), not errors.

use std::path::PathBuf;

use thiserror::Error;

use covenant_core::{CanonicalizationError, DigestString, VersionToken};

use crate::manifest::MANIFEST_FORMAT_VERSION;
use crate::unit::HashUnitKind;

/// Errors raised by registry population and manifest I/O.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A version token was registered twice with diverging digests. This
    /// is a release/configuration defect and is never resolved at runtime.
    #[error(
        "duplicate {kind} version \"{id}\": registered digest {existing} does not match {attempted}"
    )]
    DuplicateVersion {
        /// The kind of the conflicting unit.
        kind: HashUnitKind,
        /// The version token registered twice.
        id: VersionToken,
        /// The digest already recorded.
        existing: DigestString,
        /// The digest the rejected registration carried.
        attempted: DigestString,
    },

    /// Class byte extraction failed during registration.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The manifest declares a format version this build does not read.
    #[error(
        "unsupported manifest format version {found} (this build reads version {MANIFEST_FORMAT_VERSION})"
    )]
    UnsupportedManifestVersion {
        /// The version the manifest declared.
        found: u32,
    },

    /// Reading a manifest file failed.
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing a manifest file failed.
    #[error("failed to write manifest {path}: {source}")]
    ManifestWrite {
        /// The manifest path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A manifest file did not parse as the expected JSON form.
    #[error("failed to parse manifest {path}: {source}")]
    ManifestFormat {
        /// The manifest path.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
