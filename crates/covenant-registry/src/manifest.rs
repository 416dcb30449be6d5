//! # Hash Unit Manifests
//!
//! The persisted form of registry entries: one JSON manifest per released
//! artifact set, distributed alongside the compiled contract code. A
//! manifest round-trips `{kind, id, classes, digest}` losslessly — the
//! identifier newtypes validate on deserialization, so a corrupted or
//! hand-edited manifest fails at load time, not at verification time.
//!
//! Serialization is compact JSON with a trailing newline and sorted map
//! keys, so regenerating an unchanged manifest is byte-identical.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::unit::HashUnit;

/// The manifest format version this build reads and writes.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// A collection of hash units in their persisted form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    covenant_manifest_version: u32,
    units: Vec<HashUnit>,
}

impl Manifest {
    /// Create an empty manifest at the current format version.
    pub fn new() -> Self {
        Self {
            covenant_manifest_version: MANIFEST_FORMAT_VERSION,
            units: Vec::new(),
        }
    }

    /// Create a manifest holding the given units.
    pub fn from_units(units: Vec<HashUnit>) -> Self {
        Self {
            covenant_manifest_version: MANIFEST_FORMAT_VERSION,
            units,
        }
    }

    /// The units this manifest carries, in file order.
    pub fn units(&self) -> &[HashUnit] {
        &self.units
    }

    /// Append a unit.
    pub fn push(&mut self, unit: HashUnit) {
        self.units.push(unit);
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let bytes = std::fs::read(path).map_err(|source| RegistryError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Self =
            serde_json::from_slice(&bytes).map_err(|source| RegistryError::ManifestFormat {
                path: path.to_path_buf(),
                source,
            })?;
        if manifest.covenant_manifest_version != MANIFEST_FORMAT_VERSION {
            return Err(RegistryError::UnsupportedManifestVersion {
                found: manifest.covenant_manifest_version,
            });
        }
        Ok(manifest)
    }

    /// Serialize and write the manifest.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let mut bytes =
            serde_json::to_vec(self).map_err(|source| RegistryError::ManifestFormat {
                path: path.to_path_buf(),
                source,
            })?;
        bytes.push(b'\n');
        std::fs::write(path, bytes).map_err(|source| RegistryError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use covenant_core::{CanonicalBytes, ClassName, VersionToken};

    use super::*;
    use crate::unit::{ClassMembership, HashUnitKind};

    fn sample_unit() -> HashUnit {
        let name = ClassName::new("com.example.A").unwrap();
        let bytes: BTreeMap<ClassName, CanonicalBytes> = [(
            name.clone(),
            CanonicalBytes::new(&name, b"alpha".to_vec()).unwrap(),
        )]
        .into_iter()
        .collect();
        HashUnit::compute(
            HashUnitKind::Contract,
            VersionToken::new("1631912511583").unwrap(),
            vec![
                ClassMembership::required(name),
                ClassMembership::advisory(ClassName::new("com.example.Advisory").unwrap()),
            ],
            &bytes,
        )
        .unwrap()
    }

    #[test]
    fn manifest_round_trips_losslessly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covenant-hashes.json");

        let manifest = Manifest::from_units(vec![sample_unit()]);
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded.units(), manifest.units());
    }

    #[test]
    fn saved_manifest_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");

        let manifest = Manifest::from_units(vec![sample_unit()]);
        manifest.save(&a).unwrap();
        manifest.save(&b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn saved_manifest_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("covenant-hashes.json");
        Manifest::from_units(vec![sample_unit()]).save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
    }

    #[test]
    fn load_rejects_unknown_format_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        std::fs::write(&path, br#"{"covenant_manifest_version":99,"units":[]}"#).unwrap();
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnsupportedManifestVersion { found: 99 }
        ));
    }

    #[test]
    fn load_rejects_corrupted_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(
            &path,
            br#"{"covenant_manifest_version":1,"units":[{"kind":"contract","id":"v1","classes":{"com.example.A":true},"digest":"tampered"}]}"#,
        )
        .unwrap();
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, RegistryError::ManifestFormat { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Manifest::load(Path::new("/nonexistent/covenant-hashes.json")).unwrap_err();
        assert!(matches!(err, RegistryError::ManifestRead { .. }));
    }
}
