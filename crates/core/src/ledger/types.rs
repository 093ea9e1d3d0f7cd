//! Domain types for recording and querying ledger entries.
//!
//! Wire names follow the organization's existing client (`jenis`, `nominal`,
//! `kategoriId`, ...), so the serde attributes live next to the types.

use chrono::{DateTime, NaiveDate, Utc};
use kas_shared::types::{CategoryId, EntryId, UserId};
use serde::{Deserialize, Serialize};

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// Money coming in; adds to the balance.
    Income,
    /// Money going out; subtracts from the balance.
    Expense,
}

impl EntryKind {
    /// Parses a kind after trimming and uppercasing. Only `INCOME` and
    /// `EXPENSE` are recognized.
    #[must_use]
    pub fn parse_normalized(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the canonical stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw entry fields as submitted by a client, before validation.
///
/// Every field is optional so that a missing field surfaces as
/// [`LedgerError::IncompleteEntry`](super::LedgerError::IncompleteEntry)
/// rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryInput {
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "transactionDate")]
    pub transaction_date: Option<String>,
    /// `INCOME` or `EXPENSE`, any case.
    #[serde(rename = "jenis")]
    pub kind: Option<String>,
    /// Referenced category.
    #[serde(rename = "kategoriId")]
    pub category_id: Option<i32>,
    /// Amount in whole currency units.
    #[serde(rename = "nominal")]
    pub amount: Option<i64>,
    /// Optional free text.
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
}

/// A validated entry, ready for the balance check and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    /// Date the cash moved.
    pub transaction_date: NaiveDate,
    /// Normalized kind.
    pub kind: EntryKind,
    /// Referenced category (existence is checked by the store).
    pub category_id: CategoryId,
    /// Non-negative amount.
    pub amount: i64,
    /// Note, `None` when absent or blank.
    pub note: Option<String>,
}

/// A stored entry joined with its category name and recorder username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    /// Entry id.
    pub id: EntryId,
    /// Date the cash moved.
    #[serde(rename = "transactionDate")]
    pub transaction_date: NaiveDate,
    /// Income or expense.
    #[serde(rename = "jenis")]
    pub kind: EntryKind,
    /// Amount in whole currency units.
    #[serde(rename = "nominal")]
    pub amount: i64,
    /// Optional note.
    #[serde(rename = "keterangan")]
    pub note: Option<String>,
    /// Category id.
    #[serde(rename = "kategoriId")]
    pub category_id: CategoryId,
    /// Category name, when joined.
    #[serde(rename = "kategoriNama")]
    pub category_name: Option<String>,
    /// Recording user id.
    #[serde(rename = "dicatatOleh")]
    pub recorded_by: UserId,
    /// Recording user's username, when joined.
    #[serde(rename = "dicatatOlehNama")]
    pub recorded_by_name: Option<String>,
    /// Server-assigned creation timestamp.
    #[serde(rename = "tglPencatatan")]
    pub recorded_at: DateTime<Utc>,
}

/// Raw history query string parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Inclusive lower date bound.
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Inclusive upper date bound.
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    /// Kind filter; unrecognized values are ignored.
    #[serde(rename = "jenis")]
    pub kind: Option<String>,
    /// Category filter, numeric.
    #[serde(rename = "kategoriId")]
    pub category_id: Option<String>,
}

/// Parsed history filter. All present conditions are ANDed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Inclusive lower date bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end_date: Option<NaiveDate>,
    /// Kind filter.
    pub kind: Option<EntryKind>,
    /// Category filter.
    pub category_id: Option<CategoryId>,
}

/// Raw period query string parameters for summaries and reports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    /// Inclusive start date.
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// Inclusive end date.
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// Inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning `None` if `start > end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}
