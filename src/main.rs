//! Entry point for the `txfgen` binary.

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    env_logger::init();
    cli::run(cli::Cli::parse())
}
