//! # covenant-cli — CLI Tool for the Covenant Platform
//!
//! Provides the `covenant` command-line interface used by release
//! tooling and operators:
//!
//! - `covenant digest` — compute the hash-unit digest of a class
//!   directory.
//! - `covenant register` — record a hash unit in a manifest.
//! - `covenant verify` — verify a class directory against a registered
//!   manifest entry.
//!
//! Class directories hold one file per class; each file's name is the
//! fully-qualified class name and its content is the canonical byte
//! representation produced by the extractor toolchain.

pub mod class_dir;
pub mod digest;
pub mod register;
pub mod verify;

use clap::ValueEnum;

use covenant_registry::HashUnitKind;

/// Hash-unit kind as a CLI argument.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    /// Business-logic contract classes.
    Contract,
    /// Protocol-buffer message classes.
    Proto,
}

impl From<KindArg> for HashUnitKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Contract => HashUnitKind::Contract,
            KindArg::Proto => HashUnitKind::Proto,
        }
    }
}
