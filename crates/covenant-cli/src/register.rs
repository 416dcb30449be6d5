//! # Register Subcommand
//!
//! Computes a hash unit from a class directory and records it in a
//! manifest file. Registration is append-only: a version token already
//! present with a different digest is a release defect and fails the
//! command.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use covenant_core::{ClassName, VersionToken};
use covenant_registry::{
    ClassMembership, HashUnit, Manifest, Registered, Registry, RegistryError,
};

use crate::class_dir::DirectorySource;
use crate::KindArg;

/// Arguments for the `covenant register` subcommand.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Directory of canonical class byte files.
    #[arg(value_name = "CLASS_DIR")]
    pub classes: PathBuf,

    /// Version token to register the unit under.
    #[arg(long)]
    pub id: String,

    /// Which side of the release this unit covers.
    #[arg(long, value_enum, default_value = "contract")]
    pub kind: KindArg,

    /// Manifest file to record the unit in (created if absent).
    #[arg(long)]
    pub manifest: PathBuf,

    /// Mark a class as advisory (tracked but excluded from the digest).
    /// May be repeated.
    #[arg(long = "advisory", value_name = "CLASS")]
    pub advisory: Vec<String>,
}

/// Execute the register subcommand.
///
/// Returns exit code 0 on success (including an idempotent
/// re-registration), 1 on a digest conflict, 2 on operational error.
pub fn run_register(args: &RegisterArgs) -> Result<u8> {
    let id = VersionToken::new(&args.id)?;
    let kind = args.kind.into();

    let source = DirectorySource::new(&args.classes);
    let names = source.class_names()?;
    if names.is_empty() {
        bail!("no class files found in {}", args.classes.display());
    }

    let mut advisory = BTreeSet::new();
    for name in &args.advisory {
        let class = ClassName::new(name)?;
        if !names.contains(&class) {
            bail!(
                "--advisory class {class} has no file in {}",
                args.classes.display()
            );
        }
        advisory.insert(class);
    }

    let memberships: Vec<ClassMembership> = names
        .into_iter()
        .map(|class| {
            if advisory.contains(&class) {
                ClassMembership::advisory(class)
            } else {
                ClassMembership::required(class)
            }
        })
        .collect();

    let unit = HashUnit::from_source(kind, id, memberships, &source)?;

    let mut manifest = if args.manifest.exists() {
        Manifest::load(&args.manifest)?
    } else {
        Manifest::new()
    };

    // Replay the manifest through a registry so the append observes the
    // same conflict rules verification relies on.
    let registry = Registry::new();
    registry.load_manifest(&manifest)?;

    match registry.register(unit.clone()) {
        Ok(Registered::Inserted) => {
            manifest.push(unit.clone());
            manifest.save(&args.manifest)?;
            println!(
                "OK: registered {} {} -> {}",
                unit.kind(),
                unit.id(),
                unit.digest()
            );
            Ok(0)
        }
        Ok(Registered::AlreadyRegistered) => {
            println!(
                "OK: {} {} already registered with identical digest",
                unit.kind(),
                unit.id()
            );
            Ok(0)
        }
        Err(err @ RegistryError::DuplicateVersion { .. }) => {
            println!("FAIL: {err}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}
