//! TXF emission (`txfgen write ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use log::debug;
use txfgen::{Header, Manifest, default_program, write_manifest};

use crate::cli::utils::open_output;

/// Arguments for `txfgen write`.
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Manifest of extracted tax form data (JSON).
    pub manifest: PathBuf,

    /// Omit the header record from the TXF output.
    #[arg(long)]
    pub omit_header: bool,

    /// Replace differing per-payee donation dates with Various.
    #[arg(long, short = 'r')]
    pub replace_dates: bool,

    /// Program identifier for the header record.
    #[arg(long, default_value_t = default_program())]
    pub program: String,

    /// Output file (`-` for stdout).
    #[arg(long, short = 'o', default_value = "-")]
    pub output: PathBuf,
}

/// Execute the write command.
pub fn handle(args: WriteArgs) -> Result<()> {
    let mut manifest = Manifest::load(&args.manifest)?;
    manifest
        .validate()
        .with_context(|| format!("invalid manifest {}", args.manifest.display()))?;
    if args.replace_dates {
        manifest.replace_varying_dates();
    }
    debug!(
        "writing {} records from {} forms",
        manifest.record_count(),
        manifest.forms.len()
    );

    let header = (!args.omit_header)
        .then(|| Header::new(args.program.clone(), Local::now().date_naive()));
    let out = open_output(&args.output)?;
    write_manifest(out, &manifest, header.as_ref())
        .with_context(|| format!("failed to write TXF output to {}", args.output.display()))
}
