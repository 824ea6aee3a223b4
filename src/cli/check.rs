//! Manifest validation (`txfgen check ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use txfgen::{FormEntry, Manifest};

/// Arguments for `txfgen check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Manifest of extracted tax form data (JSON).
    pub manifest: PathBuf,
}

/// Execute the check command.
pub fn handle(args: CheckArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    manifest
        .validate()
        .with_context(|| format!("invalid manifest {}", args.manifest.display()))?;
    for entry in &manifest.forms {
        println!("{}", describe(entry));
    }
    println!(
        "{} forms, {} records",
        manifest.forms.len(),
        manifest.record_count()
    );
    Ok(())
}

fn describe(entry: &FormEntry) -> String {
    match entry {
        FormEntry::Form1099Int(form) => format!("1099-INT from {}", form.payer),
        FormEntry::CashDonations { donations, total } => format!(
            "cash donations: {} entries{}",
            donations.len(),
            summary_note(total)
        ),
        FormEntry::FederalEstTax { payments, total } => format!(
            "federal estimated tax: {} payments{}",
            payments.len(),
            summary_note(total)
        ),
        FormEntry::StateEstTax {
            state,
            payments,
            total,
        } => format!(
            "{state} estimated tax: {} payments{}",
            payments.len(),
            summary_note(total)
        ),
    }
}

fn summary_note(total: &Option<String>) -> &'static str {
    if total.is_some() { " + summary" } else { "" }
}
