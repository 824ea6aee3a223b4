//! Typed per-form inputs and their conversion into TXF records.

use serde::{Deserialize, Serialize};

use crate::amount;
use crate::record::{Record, RefNum};

/// Jurisdiction placeholder written on the `P` line of federal payments.
pub const FEDERAL_JURISDICTION: &str = "XX";

/// Date placeholder substituted when a payee's donations span several dates.
pub const VARIOUS_DATES: &str = "Various";

const DONATION_CATEGORY: &str = "Cash donation";
const FEDERAL_CATEGORY: &str = "Fed qtr est tax";
const STATE_CATEGORY: &str = "Sta qtr est tax";

/// Interest data lifted from a Form 1099-INT statement.
///
/// Box values arrive as raw statement text, possibly `$`-prefixed and comma
/// separated. Absent boxes produce no record at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Form1099Int {
    pub payer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_4: Option<String>,
}

impl Form1099Int {
    /// One format-3 record per box present, in box order. Boxes 1 and 3 are
    /// income; box 4 (tax withheld) is an expense.
    pub fn records(&self) -> Vec<Record> {
        let mut records = Vec::new();
        if let Some(box_1) = &self.box_1 {
            records.push(Record::described(
                RefNum::InterestIncome,
                amount::income(box_1),
                self.payer.as_str(),
            ));
        }
        if let Some(box_3) = &self.box_3 {
            records.push(Record::described(
                RefNum::SavingsBondInterest,
                amount::income(box_3),
                self.payer.as_str(),
            ));
        }
        if let Some(box_4) = &self.box_4 {
            records.push(Record::described(
                RefNum::FederalTaxWithheld,
                amount::expense(box_4),
                self.payer.as_str(),
            ));
        }
        records
    }
}

/// One cash donation row. Date, payee, and amount are mandatory; the
/// remaining fields default to empty and only affect the detail string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashDonation {
    pub date: String,
    pub payee: String,
    pub amount: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub check_number: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub category: String,
}

impl CashDonation {
    /// Format-1 detail record with the fixed-width detail string attached.
    pub fn record(&self) -> Record {
        let detail = detail_line(
            &self.date,
            &self.account,
            &self.check_number,
            &self.payee,
            &self.memo,
            category_or(&self.category, DONATION_CATEGORY),
        );
        Record::amount_only(RefNum::CashContributions, amount::expense(&self.amount))
            .with_detail(detail)
    }
}

/// Format-1 summary record carrying the grand total of all donations.
pub fn cash_donations_summary(total: &str) -> Record {
    Record::amount_only(RefNum::CashContributions, amount::expense(total))
}

/// One quarterly estimated tax payment row. Date and amount are mandatory;
/// the rest default to empty and only affect the detail string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EstTaxPayment {
    pub date: String,
    pub amount: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub check_number: String,
    #[serde(default)]
    pub payee: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub category: String,
}

impl EstTaxPayment {
    /// Format-6 detail record for a federal payment (`XX` jurisdiction).
    pub fn federal_record(&self) -> Record {
        self.dated_record(
            RefNum::FederalEstimatedTax,
            FEDERAL_JURISDICTION,
            FEDERAL_CATEGORY,
        )
    }

    /// Format-6 detail record for a payment to `state`.
    pub fn state_record(&self, state: &str) -> Record {
        self.dated_record(RefNum::StateEstimatedTax, state, STATE_CATEGORY)
    }

    fn dated_record(&self, ref_num: RefNum, jurisdiction: &str, default_category: &str) -> Record {
        let detail = detail_line(
            &self.date,
            &self.account,
            &self.check_number,
            &self.payee,
            &self.memo,
            category_or(&self.category, default_category),
        );
        Record::dated(
            ref_num,
            self.date.as_str(),
            amount::expense(&self.amount),
            jurisdiction,
        )
        .with_detail(detail)
    }
}

/// Format-6 summary record (empty date) for federal estimated tax payments.
pub fn federal_est_tax_summary(total: &str) -> Record {
    Record::dated(
        RefNum::FederalEstimatedTax,
        "",
        amount::expense(total),
        FEDERAL_JURISDICTION,
    )
}

/// Format-6 summary record (empty date) for state estimated tax payments.
pub fn state_est_tax_summary(total: &str, state: &str) -> Record {
    Record::dated(RefNum::StateEstimatedTax, "", amount::expense(total), state)
}

/// Collapse per-payee dates: when one payee's donations carry more than one
/// distinct date, every donation for that payee gets the [`VARIOUS_DATES`]
/// placeholder instead.
pub fn replace_varying_dates(donations: &mut [CashDonation]) {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (idx, donation) in donations.iter().enumerate() {
        match groups.iter_mut().find(|(payee, _)| *payee == donation.payee) {
            Some((_, indices)) => indices.push(idx),
            None => groups.push((donation.payee.clone(), vec![idx])),
        }
    }
    for (_, indices) in &groups {
        let all_same = indices
            .windows(2)
            .all(|pair| donations[pair[0]].date == donations[pair[1]].date);
        if all_same {
            continue;
        }
        for &idx in indices {
            donations[idx].date = VARIOUS_DATES.to_string();
        }
    }
}

/// Left-justify `value` into exactly `width` columns, truncating or padding
/// with spaces as needed.
fn fit(value: &str, width: usize) -> String {
    format!("{value:<width$.width$}")
}

/// Truncate to at most `width` columns without padding.
fn clip(value: &str, width: usize) -> String {
    format!("{value:.width$}")
}

/// Fixed-width detail string: date, account, check number, payee, memo, and
/// category at widths 10/30/6/40/40/15. Payee and memo abut; the other fields
/// are space separated and the trailing category is clipped, not padded.
fn detail_line(
    date: &str,
    account: &str,
    check_number: &str,
    payee: &str,
    memo: &str,
    category: &str,
) -> String {
    format!(
        "{} {} {} {}{} {}",
        fit(date, 10),
        fit(account, 30),
        fit(check_number, 6),
        fit(payee, 40),
        fit(memo, 40),
        clip(category, 15),
    )
}

/// The consuming software needs a non-blank category column to parse the
/// detail line, so empty or whitespace-only input falls back to the per-form
/// default.
fn category_or<'a>(category: &'a str, default: &'a str) -> &'a str {
    if category.trim_start().is_empty() {
        default
    } else {
        category
    }
}
