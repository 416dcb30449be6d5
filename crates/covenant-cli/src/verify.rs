//! # Verify Subcommand
//!
//! Verifies a class directory against a registered manifest entry — the
//! same check the runtime performs before dispatching a contract function.
//! Any verdict other than a match exits nonzero so CI pipelines and
//! release gates can block on it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use covenant_core::VersionToken;
use covenant_registry::{Manifest, Registry};

use crate::class_dir::DirectorySource;
use crate::KindArg;

/// Arguments for the `covenant verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Directory of canonical class byte files to verify.
    #[arg(value_name = "CLASS_DIR")]
    pub classes: PathBuf,

    /// Version token the live classes claim to be.
    #[arg(long)]
    pub id: String,

    /// Which side of the release to verify against.
    #[arg(long, value_enum, default_value = "contract")]
    pub kind: KindArg,

    /// Manifest file holding the registered units.
    #[arg(long)]
    pub manifest: PathBuf,
}

/// Execute the verify subcommand.
///
/// Returns exit code 0 on a match, 1 on any non-match verdict, 2 on
/// operational error.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let id = VersionToken::new(&args.id)?;
    let kind = args.kind.into();

    let manifest = Manifest::load(&args.manifest)?;
    let registry = Registry::new();
    registry.load_manifest(&manifest)?;

    let live = DirectorySource::new(&args.classes).load_all()?;

    let verdict = registry.verify(kind, &id, &live);
    if verdict.is_match() {
        println!("OK: {verdict}");
        Ok(0)
    } else {
        println!("FAIL: {verdict}");
        Ok(1)
    }
}
