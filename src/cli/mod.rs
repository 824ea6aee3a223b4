//! Command-line interface for the `txfgen` binary.
//!
//! Owns the clap definitions; each command's execution lives in its own
//! submodule.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod utils;
pub mod write;

/// Parsed CLI entrypoint for the `txfgen` binary.
#[derive(Parser, Debug)]
#[command(
    name = "txfgen",
    version,
    about = "Generate Tax Exchange Format (TXF) records from extracted tax data"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Emit the TXF record stream for a manifest.
    Write(write::WriteArgs),
    /// Validate a manifest and report what it would produce.
    Check(check::CheckArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Write(args) => write::handle(args),
        Command::Check(args) => check::handle(args),
    }
}
