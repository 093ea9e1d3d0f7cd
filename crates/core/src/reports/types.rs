//! Report types.

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::EntryRecord;

/// Totals and entries for an inclusive date range.
///
/// `period_balance` is income minus expense inside the range, not the running
/// balance as of `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodReport {
    /// First day of the period.
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    /// Last day of the period.
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    /// Sum of INCOME amounts in the period.
    #[serde(rename = "totalPemasukan")]
    pub income_total: i64,
    /// Sum of EXPENSE amounts in the period.
    #[serde(rename = "totalPengeluaran")]
    pub expense_total: i64,
    /// Income minus expense in the period.
    #[serde(rename = "saldoPeriode")]
    pub period_balance: i64,
    /// Entries in the period, oldest first.
    #[serde(rename = "transaksi")]
    pub entries: Vec<EntryRecord>,
}

/// Overall totals over every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    /// Sum of all INCOME amounts.
    #[serde(rename = "totalPemasukan")]
    pub income_total: i64,
    /// Sum of all EXPENSE amounts.
    #[serde(rename = "totalPengeluaran")]
    pub expense_total: i64,
    /// Current running balance.
    #[serde(rename = "totalSaldo")]
    pub balance: i64,
}

/// Printable output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Fixed-width plain text.
    Text,
    /// Comma-separated values.
    Csv,
}

impl ReportFormat {
    /// File extension for downloads.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }

    /// MIME type for the response body.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}
