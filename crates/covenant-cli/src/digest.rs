//! # Digest Subcommand
//!
//! Computes the hash-unit digest of a class directory and prints it. Every
//! class file in the directory participates as required; registration-time
//! advisory flags are the `register` subcommand's concern.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use covenant_hash::{collect_unit_bytes, compute_unit_digest};

use crate::class_dir::DirectorySource;

/// Arguments for the `covenant digest` subcommand.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Directory of canonical class byte files (one file per class, named
    /// by qualified class name).
    #[arg(value_name = "CLASS_DIR")]
    pub classes: PathBuf,
}

/// Execute the digest subcommand.
///
/// Returns exit code 0 on success; operational failures propagate as
/// errors (exit code 2).
pub fn run_digest(args: &DigestArgs) -> Result<u8> {
    let source = DirectorySource::new(&args.classes);
    let names = source.class_names()?;
    if names.is_empty() {
        bail!("no class files found in {}", args.classes.display());
    }

    let bytes = collect_unit_bytes(&source, names.iter())?;
    let digest = compute_unit_digest(&bytes).to_digest_string();
    println!("{digest}");
    Ok(0)
}
