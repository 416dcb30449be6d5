//! # covenant CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use covenant_cli::digest::{run_digest, DigestArgs};
use covenant_cli::register::{run_register, RegisterArgs};
use covenant_cli::verify::{run_verify, VerifyArgs};

/// Covenant platform CLI
///
/// Deterministic hash-unit digest computation, manifest registration, and
/// pre-dispatch verification for contract class sets.
#[derive(Parser, Debug)]
#[command(name = "covenant", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the hash-unit digest of a class directory.
    Digest(DigestArgs),

    /// Record a hash unit in a manifest.
    Register(RegisterArgs),

    /// Verify a class directory against a registered manifest entry.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Digest(args) => run_digest(&args),
        Commands::Register(args) => run_register(&args),
        Commands::Verify(args) => run_verify(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
