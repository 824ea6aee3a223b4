/// Category code tying a record to a line in the consuming software.
///
/// The set is fixed by the TXF V042 assignments for the forms this tool
/// covers; the numeric value lands on the `N` line of each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefNum {
    /// Form 1099-INT box 1, taxable interest income.
    InterestIncome,
    /// Form 1099-INT box 3, interest on U.S. savings bonds and Treasury obligations.
    SavingsBondInterest,
    /// Form 1099-INT box 4, federal income tax withheld.
    FederalTaxWithheld,
    /// Schedule A cash charitable contributions.
    CashContributions,
    /// Federal quarterly estimated tax payments.
    FederalEstimatedTax,
    /// State quarterly estimated tax payments.
    StateEstimatedTax,
}

impl RefNum {
    /// Numeric code written on the `N` line.
    pub fn code(self) -> u16 {
        match self {
            RefNum::InterestIncome => 287,
            RefNum::SavingsBondInterest => 288,
            RefNum::FederalTaxWithheld => 616,
            RefNum::CashContributions => 280,
            RefNum::FederalEstimatedTax => 521,
            RefNum::StateEstimatedTax => 522,
        }
    }
}

/// Layout selector for a record. The three formats are the closed set the
/// consuming software accepts for the categories above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// Record Format 1: a bare categorized amount.
    Amount,
    /// Record Format 3: an amount carrying a free-text description.
    Described { description: String },
    /// Record Format 6: a dated amount with a jurisdiction code.
    Dated { date: String, jurisdiction: String },
}

/// A single TXF record, built immediately before serialization and discarded
/// after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub ref_num: RefNum,
    /// Copy number for the `C` line; 1 unless the caller overrides it.
    pub copy: u32,
    /// Line number for the `L` line; 1 unless the caller overrides it.
    pub line: u32,
    /// Amount string with the sign policy already applied.
    pub amount: String,
    /// Fixed-width detail string; presence switches the start tag from `TS`
    /// to `TD`.
    pub detail: Option<String>,
    pub kind: RecordKind,
}

impl Record {
    /// Format-1 record holding nothing but a categorized amount.
    pub fn amount_only(ref_num: RefNum, amount: impl Into<String>) -> Self {
        Self {
            ref_num,
            copy: 1,
            line: 1,
            amount: amount.into(),
            detail: None,
            kind: RecordKind::Amount,
        }
    }

    /// Format-3 record: an amount plus a description line.
    pub fn described(
        ref_num: RefNum,
        amount: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            ref_num,
            copy: 1,
            line: 1,
            amount: amount.into(),
            detail: None,
            kind: RecordKind::Described {
                description: description.into(),
            },
        }
    }

    /// Format-6 record: a dated amount with a jurisdiction code. Summary
    /// records pass an empty date.
    pub fn dated(
        ref_num: RefNum,
        date: impl Into<String>,
        amount: impl Into<String>,
        jurisdiction: impl Into<String>,
    ) -> Self {
        Self {
            ref_num,
            copy: 1,
            line: 1,
            amount: amount.into(),
            detail: None,
            kind: RecordKind::Dated {
                date: date.into(),
                jurisdiction: jurisdiction.into(),
            },
        }
    }

    /// Attach a detail string, turning the record into its `TD` variant.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
