//! Serialization of headers and records onto a byte sink.

use std::io::{self, Write};

use chrono::NaiveDate;
use log::warn;

use crate::forms::{self, CashDonation, EstTaxPayment, Form1099Int};
use crate::record::{Record, RecordKind};

/// Format-version tag emitted at the top of every stream.
pub const TXF_VERSION: &str = "V042";

/// Program identifier written on the header `A` line by default.
pub fn default_program() -> String {
    format!("txfgen {}", env!("CARGO_PKG_VERSION"))
}

/// Fields of the once-per-stream header record.
#[derive(Debug, Clone)]
pub struct Header {
    pub program: String,
    /// Day stamp for the `D` line, injected by the caller rather than read
    /// from the clock here.
    pub date: NaiveDate,
}

impl Header {
    pub fn new(program: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            program: program.into(),
            date,
        }
    }
}

/// Writes TXF lines to an output sink.
///
/// Every line, the final `^` included, is terminated with CR LF regardless of
/// platform; the consuming software requires that exact terminator. The
/// writer performs no validation of its own: amounts, dates, and state codes
/// are serialized exactly as supplied.
pub struct TxfWriter<W: Write> {
    out: W,
}

impl<W: Write> TxfWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the writer and hand the sink back.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\r\n")
    }

    /// Header record: version tag, program identifier, day stamp, terminator.
    /// Call at most once per stream, before any record.
    pub fn header(&mut self, program: &str, today: NaiveDate) -> io::Result<()> {
        self.line(TXF_VERSION)?;
        self.line(&format!("A{program}"))?;
        self.line(&format!("D{}", today.format("%m/%d/%Y")))?;
        self.line("^")
    }

    /// Serialize one record in its format's fixed line order.
    pub fn record(&mut self, record: &Record) -> io::Result<()> {
        self.line(if record.detail.is_some() { "TD" } else { "TS" })?;
        self.line(&format!("N{}", record.ref_num.code()))?;
        self.line(&format!("C{}", record.copy))?;
        self.line(&format!("L{}", record.line))?;
        if let RecordKind::Dated { date, .. } = &record.kind {
            self.line(&format!("D{date}"))?;
        }
        self.line(&format!("${}", record.amount))?;
        match &record.kind {
            RecordKind::Amount => {}
            RecordKind::Described { description } => self.line(&format!("P{description}"))?,
            RecordKind::Dated { jurisdiction, .. } => self.line(&format!("P{jurisdiction}"))?,
        }
        if let Some(detail) = &record.detail {
            self.line(&format!("X{detail}"))?;
        }
        self.line("^")
    }

    /// Records for each box present on a 1099-INT; absent boxes write
    /// nothing, so a form with no amounts is a no-op.
    pub fn form_1099_int(&mut self, form: &Form1099Int) -> io::Result<()> {
        let records = form.records();
        if records.is_empty() {
            warn!(
                "1099-INT for '{}' has no box amounts; nothing written",
                form.payer
            );
        }
        for record in &records {
            self.record(record)?;
        }
        Ok(())
    }

    pub fn cash_donation(&mut self, donation: &CashDonation) -> io::Result<()> {
        self.record(&donation.record())
    }

    pub fn cash_donations_summary(&mut self, total: &str) -> io::Result<()> {
        self.record(&forms::cash_donations_summary(total))
    }

    pub fn federal_est_tax_payment(&mut self, payment: &EstTaxPayment) -> io::Result<()> {
        self.record(&payment.federal_record())
    }

    pub fn federal_est_tax_summary(&mut self, total: &str) -> io::Result<()> {
        self.record(&forms::federal_est_tax_summary(total))
    }

    pub fn state_est_tax_payment(&mut self, payment: &EstTaxPayment, state: &str) -> io::Result<()> {
        self.record(&payment.state_record(state))
    }

    pub fn state_est_tax_summary(&mut self, total: &str, state: &str) -> io::Result<()> {
        self.record(&forms::state_est_tax_summary(total, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RefNum;
    use pretty_assertions::assert_eq;

    fn render(write: impl FnOnce(&mut TxfWriter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        let mut writer = TxfWriter::new(&mut buffer);
        write(&mut writer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn header_layout() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 15).unwrap();
        let output = render(|w| w.header("txfgen 0.1.0", date));
        assert_eq!(output, "V042\r\nAtxfgen 0.1.0\r\nD04/15/2021\r\n^\r\n");
    }

    #[test]
    fn format_1_summary_is_exactly_six_lines() {
        let record = Record::amount_only(RefNum::CashContributions, "-250.00");
        let output = render(|w| w.record(&record));
        assert_eq!(output, "TS\r\nN280\r\nC1\r\nL1\r\n$-250.00\r\n^\r\n");
    }

    #[test]
    fn format_1_detail_switches_to_td_and_adds_x_line() {
        let record =
            Record::amount_only(RefNum::CashContributions, "-250.00").with_detail("some detail");
        let output = render(|w| w.record(&record));
        let lines: Vec<&str> = output.split("\r\n").collect();
        assert_eq!(
            lines,
            vec!["TD", "N280", "C1", "L1", "$-250.00", "Xsome detail", "^", ""]
        );
    }

    #[test]
    fn format_3_description_follows_the_amount() {
        let record = Record::described(RefNum::InterestIncome, "100.00", "Bank");
        let output = render(|w| w.record(&record));
        assert_eq!(output, "TS\r\nN287\r\nC1\r\nL1\r\n$100.00\r\nPBank\r\n^\r\n");
    }

    #[test]
    fn format_6_puts_date_before_and_jurisdiction_after_the_amount() {
        let record = Record::dated(RefNum::StateEstimatedTax, "06/15/2021", "-400.00", "CA");
        let output = render(|w| w.record(&record));
        assert_eq!(
            output,
            "TS\r\nN522\r\nC1\r\nL1\r\nD06/15/2021\r\n$-400.00\r\nPCA\r\n^\r\n"
        );
    }

    #[test]
    fn federal_summary_has_empty_date_line_and_xx_jurisdiction() {
        let output = render(|w| w.federal_est_tax_summary("500.00"));
        assert_eq!(output, "TS\r\nN521\r\nC1\r\nL1\r\nD\r\n$-500.00\r\nPXX\r\n^\r\n");
    }

    #[test]
    fn every_line_ends_with_cr_lf_including_the_terminator() {
        let form = Form1099Int {
            payer: "Bank".to_string(),
            box_1: Some("100.00".to_string()),
            box_3: None,
            box_4: None,
        };
        let output = render(|w| w.form_1099_int(&form));
        assert!(output.ends_with("^\r\n"));
        for line in output.split_inclusive('\n') {
            assert!(line.ends_with("\r\n"), "line {line:?} not CR LF terminated");
        }
    }

    #[test]
    fn form_1099_int_single_box_emits_exactly_one_record() {
        let form = Form1099Int {
            payer: "Bank".to_string(),
            box_1: Some("100.00".to_string()),
            box_3: None,
            box_4: None,
        };
        let output = render(|w| w.form_1099_int(&form));
        assert_eq!(output.matches('^').count(), 1);
        assert!(output.contains("N287"));
        assert!(!output.contains("N288"));
        assert!(!output.contains("N616"));
    }

    #[test]
    fn form_1099_int_without_boxes_writes_nothing() {
        let form = Form1099Int {
            payer: "Bank".to_string(),
            box_1: None,
            box_3: None,
            box_4: None,
        };
        let output = render(|w| w.form_1099_int(&form));
        assert_eq!(output, "");
    }

    #[test]
    fn cash_donation_round_trip_through_the_writer() {
        let donation = CashDonation {
            date: "03/01/2021".to_string(),
            payee: "Red Cross".to_string(),
            amount: "250.00".to_string(),
            account: String::new(),
            check_number: String::new(),
            memo: String::new(),
            category: String::new(),
        };
        let output = render(|w| w.cash_donation(&donation));
        assert!(output.starts_with("TD\r\nN280\r\n"));
        assert!(output.contains("$-250.00\r\n"));
        assert!(output.contains("X03/01/2021 "));
    }
}
