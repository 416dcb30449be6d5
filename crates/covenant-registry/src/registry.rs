//! # Hash Unit Registry
//!
//! The process-wide mapping from `(kind, version token)` to immutable
//! [`HashUnit`] entries. Populated from manifests at startup and shared
//! read-only (wrap in `Arc`) for the life of the process; verification
//! never mutates it.
//!
//! Registration after startup is supported for embedders that discover
//! units dynamically, under single-writer/multiple-reader discipline: the
//! interior `parking_lot::RwLock` preserves the append-only,
//! no-silent-overwrite invariant under concurrent access.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use covenant_core::{CanonicalBytes, ClassName, VersionToken};

use crate::error::RegistryError;
use crate::manifest::Manifest;
use crate::unit::{HashUnit, HashUnitKind};
use crate::verify::{verify_unit, VerificationResult};

/// The outcome of a successful registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// The unit was not previously present and is now recorded.
    Inserted,
    /// An identical unit (same kind, token, and digest) was already
    /// recorded; the call was a no-op.
    AlreadyRegistered,
}

/// An append-only registry of hash units keyed by kind and version token.
#[derive(Debug, Default)]
pub struct Registry {
    units: RwLock<BTreeMap<(HashUnitKind, VersionToken), HashUnit>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hash unit.
    ///
    /// Re-registering an identical unit is an idempotent no-op. A unit
    /// whose token is already recorded with a *different* digest fails with
    /// [`RegistryError::DuplicateVersion`] — entries are never silently
    /// overwritten. Two versions covering an identical required class set
    /// are accepted (historical release data contains such pairs) but
    /// logged as a consistency warning.
    pub fn register(&self, unit: HashUnit) -> Result<Registered, RegistryError> {
        let mut units = self.units.write();
        let key = (unit.kind(), unit.id().clone());

        if let Some(existing) = units.get(&key) {
            if existing.digest() == unit.digest() {
                tracing::debug!(
                    kind = %unit.kind(),
                    id = %unit.id(),
                    "hash unit already registered with identical digest"
                );
                return Ok(Registered::AlreadyRegistered);
            }
            return Err(RegistryError::DuplicateVersion {
                kind: unit.kind(),
                id: unit.id().clone(),
                existing: existing.digest().clone(),
                attempted: unit.digest().clone(),
            });
        }

        let required: BTreeSet<&ClassName> = unit.required_classes().collect();
        for twin in units.values().filter(|u| {
            u.kind() == unit.kind() && u.required_classes().collect::<BTreeSet<_>>() == required
        }) {
            tracing::warn!(
                kind = %unit.kind(),
                id = %unit.id(),
                twin = %twin.id(),
                "registering a class set identical to an existing version"
            );
        }

        tracing::debug!(
            kind = %unit.kind(),
            id = %unit.id(),
            digest = %unit.digest(),
            classes = unit.classes().len(),
            "registered hash unit"
        );
        units.insert(key, unit);
        Ok(Registered::Inserted)
    }

    /// Look up the unit registered under `id`.
    pub fn lookup(&self, kind: HashUnitKind, id: &VersionToken) -> Option<HashUnit> {
        self.units.read().get(&(kind, id.clone())).cloned()
    }

    /// Find every unit of `kind` whose required class set equals `live`.
    ///
    /// Used to discover which known version(s) a code footprint could
    /// correspond to. Results are ordered by version token; more than one
    /// result means historical data registered identical class sets under
    /// several tokens.
    pub fn find_by_class_set(
        &self,
        kind: HashUnitKind,
        live: &BTreeSet<ClassName>,
    ) -> Vec<HashUnit> {
        self.units
            .read()
            .values()
            .filter(|unit| unit.kind() == kind && unit.required_classes().eq(live.iter()))
            .cloned()
            .collect()
    }

    /// Find the unit of `kind` sharing `id` and tracking `class` as
    /// required.
    ///
    /// A released contract ships its contract unit and proto unit under
    /// one version token; given the token from one side, this resolves the
    /// companion covering a particular class on the other.
    pub fn find_companion(
        &self,
        kind: HashUnitKind,
        id: &VersionToken,
        class: &ClassName,
    ) -> Option<HashUnit> {
        self.lookup(kind, id).filter(|unit| unit.is_required(class))
    }

    /// Verify live class bytes against the unit registered under `id`.
    ///
    /// Pure read path; may be called concurrently without coordination.
    pub fn verify(
        &self,
        kind: HashUnitKind,
        id: &VersionToken,
        live: &BTreeMap<ClassName, CanonicalBytes>,
    ) -> VerificationResult {
        match self.lookup(kind, id) {
            Some(unit) => verify_unit(&unit, live),
            None => VerificationResult::UnknownVersion {
                kind,
                id: id.clone(),
            },
        }
    }

    /// Register every unit of a manifest, returning how many were newly
    /// inserted.
    pub fn load_manifest(&self, manifest: &Manifest) -> Result<usize, RegistryError> {
        let mut inserted = 0;
        for unit in manifest.units() {
            if self.register(unit.clone())? == Registered::Inserted {
                inserted += 1;
            }
        }
        tracing::info!(
            inserted,
            total = manifest.units().len(),
            "loaded hash unit manifest"
        );
        Ok(inserted)
    }

    /// A snapshot of every registered unit, ordered by kind then token.
    pub fn units(&self) -> Vec<HashUnit> {
        self.units.read().values().cloned().collect()
    }

    /// The number of registered units.
    pub fn len(&self) -> usize {
        self.units.read().len()
    }

    /// Whether the registry holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.read().is_empty()
    }
}
