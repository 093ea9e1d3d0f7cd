//! Ledger error types for validation and invariant errors.
//!
//! Every variant is detected before any write, so a rejected mutation never
//! changes the stored entry set.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Malformed field value (dates, filter values).
    #[error("{0}")]
    Validation(String),

    /// A required entry field is missing.
    #[error("Entry data is incomplete: transactionDate, jenis, kategoriId and nominal are required")]
    IncompleteEntry,

    /// Kind is neither INCOME nor EXPENSE after normalization.
    #[error("Entry kind must be 'INCOME' or 'EXPENSE', got {0:?}")]
    InvalidKind(String),

    /// Path id is not a well-formed positive integer.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Period start is after its end.
    #[error("startDate {start} is after endDate {end}")]
    InvalidDateRange {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    // ========== Reference Errors ==========
    /// Referenced category does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    /// Entry does not exist.
    #[error("Entry not found: {0}")]
    EntryNotFound(i32),

    /// The authenticated user no longer exists.
    #[error("Recording user no longer exists: {0}")]
    RecorderNotFound(i32),

    // ========== Invariant Errors ==========
    /// The mutation would drive the running balance below zero.
    #[error("Insufficient balance: current balance is {balance}")]
    InsufficientBalance {
        /// Balance observed by the check (excluding the amended entry, if any).
        balance: i64,
    },

    /// The entry would push the income or expense total past the storable
    /// range.
    #[error("Entry amount is too large: the {kind} total would exceed {max}", max = i64::MAX)]
    TotalOverflow {
        /// `INCOME` or `EXPENSE`.
        kind: &'static str,
    },

    /// Deleting entries is switched off.
    #[error("Deleting entries is disabled")]
    EntryDeletionDisabled,

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::IncompleteEntry => "INCOMPLETE_ENTRY",
            Self::InvalidKind(_) => "INVALID_KIND",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::RecorderNotFound(_) => "RECORDER_NOT_FOUND",
            Self::TotalOverflow { .. } => "AMOUNT_TOO_LARGE",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::EntryDeletionDisabled => "ENTRY_DELETION_DISABLED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and invariant errors
            Self::Validation(_)
            | Self::IncompleteEntry
            | Self::InvalidKind(_)
            | Self::InvalidId(_)
            | Self::InvalidDateRange { .. }
            | Self::NegativeAmount
            | Self::CategoryNotFound(_)
            | Self::InsufficientBalance { .. }
            | Self::TotalOverflow { .. } => 400,

            // 401 Unauthorized - token outlived its user
            Self::RecorderNotFound(_) => 401,

            // 403 Forbidden
            Self::EntryDeletionDisabled => 403,

            // 404 Not Found
            Self::EntryNotFound(_) => 404,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true for failures whose detail must stay in the logs.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
