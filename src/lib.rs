//! Core library for Tax Exchange Format (TXF) record generation.
//!
//! Turns already-extracted personal tax data (cash donations, quarterly
//! estimated tax payments, Form 1099-INT box amounts) into the line-oriented
//! TXF stream that tax-preparation software imports.

pub mod amount;
mod forms;
mod manifest;
mod record;
mod writer;

pub use forms::{
    CashDonation, EstTaxPayment, FEDERAL_JURISDICTION, Form1099Int, VARIOUS_DATES,
    cash_donations_summary, federal_est_tax_summary, replace_varying_dates, state_est_tax_summary,
};
pub use manifest::{FormEntry, Manifest, ManifestError};
pub use record::{Record, RecordKind, RefNum};
pub use writer::{Header, TXF_VERSION, TxfWriter, default_program};

use std::io::{self, Write};

/// Serialize a whole manifest to `out`, preceded by the header record unless
/// `header` is `None`.
pub fn write_manifest<W: Write>(
    out: W,
    manifest: &Manifest,
    header: Option<&Header>,
) -> io::Result<()> {
    let mut writer = TxfWriter::new(out);
    if let Some(header) = header {
        writer.header(&header.program, header.date)?;
    }
    manifest.write_to(&mut writer)?;
    writer.flush()
}
