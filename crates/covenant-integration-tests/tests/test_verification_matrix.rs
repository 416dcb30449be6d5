//! # Verification End-to-End Matrix
//!
//! Exercises the full write-then-verify lifecycle across crates: canonical
//! bytes in, hash unit computed, registry populated, every verification
//! verdict observed. Also covers the concurrency contract — one registry
//! shared across threads, verified from all of them without coordination.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use covenant_core::{CanonicalBytes, ClassName, VersionToken};
use covenant_registry::{
    ClassMembership, HashUnit, HashUnitKind, Registered, Registry, RegistryError,
    VerificationResult,
};

fn class(name: &str) -> ClassName {
    ClassName::new(name).unwrap()
}

fn token(value: &str) -> VersionToken {
    VersionToken::new(value).unwrap()
}

fn bytes_for(entries: &[(&str, &[u8])]) -> BTreeMap<ClassName, CanonicalBytes> {
    entries
        .iter()
        .map(|(name, content)| {
            let name = class(name);
            let canonical = CanonicalBytes::new(&name, content.to_vec()).unwrap();
            (name, canonical)
        })
        .collect()
}

fn registry_with_v1() -> Registry {
    let registry = Registry::new();
    let unit = HashUnit::compute(
        HashUnitKind::Contract,
        token("v1"),
        vec![ClassMembership::required(class("com.example.A"))],
        &bytes_for(&[("com.example.A", b"bytes of A")]),
    )
    .unwrap();
    registry.register(unit).unwrap();
    registry
}

#[test]
fn identical_bytes_verify_as_match() {
    let registry = registry_with_v1();
    let verdict = registry.verify(
        HashUnitKind::Contract,
        &token("v1"),
        &bytes_for(&[("com.example.A", b"bytes of A")]),
    );
    assert_eq!(verdict, VerificationResult::Match);
}

#[test]
fn mutated_bytes_verify_as_mismatch() {
    let registry = registry_with_v1();
    let verdict = registry.verify(
        HashUnitKind::Contract,
        &token("v1"),
        &bytes_for(&[("com.example.A", b"bytes of a")]),
    );
    assert_eq!(
        verdict,
        VerificationResult::Mismatch {
            divergent: vec![class("com.example.A")],
        }
    );
}

#[test]
fn empty_live_set_reports_missing_required_class() {
    let registry = registry_with_v1();
    let verdict = registry.verify(HashUnitKind::Contract, &token("v1"), &BTreeMap::new());
    assert_eq!(
        verdict,
        VerificationResult::MissingRequiredClass {
            class: class("com.example.A"),
        }
    );
}

#[test]
fn unregistered_token_reports_unknown_version() {
    let registry = registry_with_v1();
    let verdict = registry.verify(
        HashUnitKind::Contract,
        &token("unknown"),
        &bytes_for(&[("com.example.A", b"bytes of A")]),
    );
    assert_eq!(
        verdict,
        VerificationResult::UnknownVersion {
            kind: HashUnitKind::Contract,
            id: token("unknown"),
        }
    );
}

#[test]
fn registry_integrity_idempotent_then_conflicting() {
    let registry = Registry::new();
    let bytes = bytes_for(&[("com.example.A", b"alpha")]);
    let unit = HashUnit::compute(
        HashUnitKind::Contract,
        token("v1"),
        vec![ClassMembership::required(class("com.example.A"))],
        &bytes,
    )
    .unwrap();

    assert_eq!(registry.register(unit.clone()).unwrap(), Registered::Inserted);
    assert_eq!(
        registry.register(unit).unwrap(),
        Registered::AlreadyRegistered
    );

    let drifted = HashUnit::compute(
        HashUnitKind::Contract,
        token("v1"),
        vec![ClassMembership::required(class("com.example.A"))],
        &bytes_for(&[("com.example.A", b"alpha-patched")]),
    )
    .unwrap();
    assert!(matches!(
        registry.register(drifted),
        Err(RegistryError::DuplicateVersion { .. })
    ));
}

#[test]
fn multi_class_unit_attributes_the_divergent_class() {
    let registry = Registry::new();
    let recorded = bytes_for(&[
        ("com.example.A", b"alpha"),
        ("com.example.B", b"beta"),
        ("com.example.C", b"gamma"),
    ]);
    let unit = HashUnit::compute(
        HashUnitKind::Contract,
        token("v2"),
        recorded
            .keys()
            .cloned()
            .map(ClassMembership::required)
            .collect::<Vec<_>>(),
        &recorded,
    )
    .unwrap();
    registry.register(unit).unwrap();

    let live = bytes_for(&[
        ("com.example.A", b"alpha"),
        ("com.example.B", b"method body changed"),
        ("com.example.C", b"gamma"),
    ]);
    let verdict = registry.verify(HashUnitKind::Contract, &token("v2"), &live);
    assert_eq!(
        verdict,
        VerificationResult::Mismatch {
            divergent: vec![class("com.example.B")],
        }
    );
}

#[test]
fn advisory_classes_do_not_gate_verification() {
    let registry = Registry::new();
    let bytes = bytes_for(&[("com.example.A", b"alpha")]);
    let unit = HashUnit::compute(
        HashUnitKind::Contract,
        token("v1"),
        vec![
            ClassMembership::required(class("com.example.A")),
            ClassMembership::advisory(class("com.example.util.Helper")),
        ],
        &bytes,
    )
    .unwrap();
    registry.register(unit).unwrap();

    // The advisory class is absent from the live set; verification passes.
    let verdict = registry.verify(HashUnitKind::Contract, &token("v1"), &bytes);
    assert_eq!(verdict, VerificationResult::Match);
}

#[test]
fn find_by_class_set_discovers_candidate_versions() {
    let registry = Registry::new();
    for (id, content) in [("v1", b"one".as_slice()), ("v2", b"two".as_slice())] {
        let unit = HashUnit::compute(
            HashUnitKind::Contract,
            token(id),
            vec![ClassMembership::required(class("com.example.A"))],
            &bytes_for(&[("com.example.A", content)]),
        )
        .unwrap();
        registry.register(unit).unwrap();
    }

    let live: BTreeSet<ClassName> = [class("com.example.A")].into_iter().collect();
    let candidates = registry.find_by_class_set(HashUnitKind::Contract, &live);
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id(), &token("v1"));
    assert_eq!(candidates[1].id(), &token("v2"));
}

#[test]
fn contract_and_proto_units_pair_by_version_token() {
    let registry = Registry::new();
    let contract = HashUnit::compute(
        HashUnitKind::Contract,
        token("1631912511583"),
        vec![ClassMembership::required(class("com.example.LoanContract"))],
        &bytes_for(&[("com.example.LoanContract", b"contract bytes")]),
    )
    .unwrap();
    let proto = HashUnit::compute(
        HashUnitKind::Proto,
        token("1631912511583"),
        vec![ClassMembership::required(class("com.example.proto.LoanProtos$Loan"))],
        &bytes_for(&[("com.example.proto.LoanProtos$Loan", b"proto bytes")]),
    )
    .unwrap();
    registry.register(contract).unwrap();
    registry.register(proto).unwrap();

    let companion = registry
        .find_companion(
            HashUnitKind::Proto,
            &token("1631912511583"),
            &class("com.example.proto.LoanProtos$Loan"),
        )
        .unwrap();
    assert_eq!(companion.kind(), HashUnitKind::Proto);

    assert!(registry
        .find_companion(
            HashUnitKind::Proto,
            &token("1631912511583"),
            &class("com.example.proto.Unrelated"),
        )
        .is_none());
}

#[test]
fn shared_registry_verifies_concurrently() {
    let registry = Arc::new(registry_with_v1());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let live = if i % 2 == 0 {
                    bytes_for(&[("com.example.A", b"bytes of A")])
                } else {
                    bytes_for(&[("com.example.A", b"drifted")])
                };
                let verdict = registry.verify(HashUnitKind::Contract, &token("v1"), &live);
                assert_eq!(verdict.is_match(), i % 2 == 0);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
