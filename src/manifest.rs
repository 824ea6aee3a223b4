//! The JSON hand-off between the document extractors and the encoder.
//!
//! Extractors (CSV readers, statement scrapers) run upstream of this tool and
//! leave behind a manifest of already-extracted field values. This module
//! owns that model: deserialization, fail-fast validation, and the mapping of
//! each section onto the record stream.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::{self, CashDonation, EstTaxPayment, Form1099Int};
use crate::writer::TxfWriter;

/// Semantic problems that must stop a run before any record is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("manifest has no forms")]
    Empty,
    #[error("{form}: {field} is required")]
    MissingField {
        form: &'static str,
        field: &'static str,
    },
    #[error("{form} row {row}: {field} is required")]
    MissingRowField {
        form: &'static str,
        row: usize,
        field: &'static str,
    },
    #[error("state code '{0}' must be a two-letter abbreviation")]
    BadStateCode(String),
    #[error("1099-INT for '{0}' has no box amounts")]
    NoBoxAmounts(String),
}

/// One tagged section of a manifest, mirroring a source statement the
/// extractors read. A `total` carries the grand-total row of the source
/// spreadsheet and produces the section's summary record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum FormEntry {
    #[serde(rename = "form_1099_int")]
    Form1099Int(Form1099Int),
    CashDonations {
        #[serde(default)]
        donations: Vec<CashDonation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<String>,
    },
    FederalEstTax {
        #[serde(default)]
        payments: Vec<EstTaxPayment>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<String>,
    },
    StateEstTax {
        state: String,
        #[serde(default)]
        payments: Vec<EstTaxPayment>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total: Option<String>,
    },
}

/// Every form section destined for one TXF output stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub forms: Vec<FormEntry>,
}

impl Manifest {
    /// Load a manifest file, attaching path context to any error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse manifest {}", path.display()))
    }

    /// Fail-fast checks on mandatory fields. The encoder itself never
    /// validates; anything that gets past here is serialized as supplied.
    pub fn validate(&self) -> std::result::Result<(), ManifestError> {
        if self.forms.is_empty() {
            return Err(ManifestError::Empty);
        }
        for entry in &self.forms {
            match entry {
                FormEntry::Form1099Int(form) => {
                    if form.payer.trim().is_empty() {
                        return Err(ManifestError::MissingField {
                            form: "form_1099_int",
                            field: "payer",
                        });
                    }
                    if form.box_1.is_none() && form.box_3.is_none() && form.box_4.is_none() {
                        return Err(ManifestError::NoBoxAmounts(form.payer.clone()));
                    }
                }
                FormEntry::CashDonations { donations, total } => {
                    for (idx, donation) in donations.iter().enumerate() {
                        require("cash_donations", idx + 1, "date", &donation.date)?;
                        require("cash_donations", idx + 1, "payee", &donation.payee)?;
                        require("cash_donations", idx + 1, "amount", &donation.amount)?;
                    }
                    require_total("cash_donations", total)?;
                }
                FormEntry::FederalEstTax { payments, total } => {
                    require_payments("federal_est_tax", payments)?;
                    require_total("federal_est_tax", total)?;
                }
                FormEntry::StateEstTax {
                    state,
                    payments,
                    total,
                } => {
                    if state.len() != 2 || !state.chars().all(|ch| ch.is_ascii_alphabetic()) {
                        return Err(ManifestError::BadStateCode(state.clone()));
                    }
                    require_payments("state_est_tax", payments)?;
                    require_total("state_est_tax", total)?;
                }
            }
        }
        Ok(())
    }

    /// Apply the per-payee date collapse to every donation section.
    pub fn replace_varying_dates(&mut self) {
        for entry in &mut self.forms {
            if let FormEntry::CashDonations { donations, .. } = entry {
                forms::replace_varying_dates(donations);
            }
        }
    }

    /// Number of TXF records this manifest will produce.
    pub fn record_count(&self) -> usize {
        self.forms
            .iter()
            .map(|entry| match entry {
                FormEntry::Form1099Int(form) => form.records().len(),
                FormEntry::CashDonations { donations, total } => {
                    donations.len() + usize::from(total.is_some())
                }
                FormEntry::FederalEstTax { payments, total } => {
                    payments.len() + usize::from(total.is_some())
                }
                FormEntry::StateEstTax {
                    payments, total, ..
                } => payments.len() + usize::from(total.is_some()),
            })
            .sum()
    }

    /// Emit every section in manifest order: detail records first, then the
    /// summary record when a total is present.
    pub fn write_to<W: Write>(&self, writer: &mut TxfWriter<W>) -> io::Result<()> {
        for entry in &self.forms {
            match entry {
                FormEntry::Form1099Int(form) => {
                    debug!("writing 1099-INT for '{}'", form.payer);
                    writer.form_1099_int(form)?;
                }
                FormEntry::CashDonations { donations, total } => {
                    debug!("writing {} cash donations", donations.len());
                    for donation in donations {
                        writer.cash_donation(donation)?;
                    }
                    if let Some(total) = total {
                        writer.cash_donations_summary(total)?;
                    }
                }
                FormEntry::FederalEstTax { payments, total } => {
                    debug!("writing {} federal estimated tax payments", payments.len());
                    for payment in payments {
                        writer.federal_est_tax_payment(payment)?;
                    }
                    if let Some(total) = total {
                        writer.federal_est_tax_summary(total)?;
                    }
                }
                FormEntry::StateEstTax {
                    state,
                    payments,
                    total,
                } => {
                    debug!(
                        "writing {} estimated tax payments for {state}",
                        payments.len()
                    );
                    for payment in payments {
                        writer.state_est_tax_payment(payment, state)?;
                    }
                    if let Some(total) = total {
                        writer.state_est_tax_summary(total, state)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn require(
    form: &'static str,
    row: usize,
    field: &'static str,
    value: &str,
) -> std::result::Result<(), ManifestError> {
    if value.trim().is_empty() {
        return Err(ManifestError::MissingRowField { form, row, field });
    }
    Ok(())
}

fn require_payments(
    form: &'static str,
    payments: &[EstTaxPayment],
) -> std::result::Result<(), ManifestError> {
    for (idx, payment) in payments.iter().enumerate() {
        require(form, idx + 1, "date", &payment.date)?;
        require(form, idx + 1, "amount", &payment.amount)?;
    }
    Ok(())
}

fn require_total(
    form: &'static str,
    total: &Option<String>,
) -> std::result::Result<(), ManifestError> {
    if let Some(total) = total {
        if total.trim().is_empty() {
            return Err(ManifestError::MissingField {
                form,
                field: "total",
            });
        }
    }
    Ok(())
}
