//! Ledger service for entry validation and balance invariant checks.
//!
//! This module provides the pure half of every ledger mutation: turning raw
//! client input into an [`EntryDraft`] and deciding, given the balance the
//! store observed, whether the mutation keeps the running balance
//! non-negative. The store calls these inside its write transaction.

use chrono::NaiveDate;
use kas_shared::types::{CategoryId, EntryId};
use tracing::debug;

use super::balance::{LedgerTotals, signed_contribution};
use super::error::LedgerError;
use super::types::{
    DateRange, EntryDraft, EntryInput, EntryKind, HistoryFilter, HistoryQuery, PeriodQuery,
};

/// Accepted date format for every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ledger service for entry validation.
///
/// This service contains pure business logic with no database dependencies.
pub struct LedgerService;

impl LedgerService {
    /// Validates raw entry input.
    ///
    /// Checks, in order:
    /// 1. All of date, kind, category and amount are present
    /// 2. Kind normalizes to `INCOME` or `EXPENSE`
    /// 3. Date is a valid `YYYY-MM-DD`
    /// 4. Amount is not negative
    ///
    /// A blank note becomes `None`. Category existence is left to the store.
    ///
    /// # Errors
    ///
    /// Returns the first `LedgerError` encountered.
    pub fn validate_input(input: &EntryInput) -> Result<EntryDraft, LedgerError> {
        let (Some(raw_date), Some(raw_kind), Some(category_id), Some(amount)) = (
            non_blank(input.transaction_date.as_deref()),
            non_blank(input.kind.as_deref()),
            input.category_id.filter(|id| *id > 0),
            input.amount,
        ) else {
            return Err(LedgerError::IncompleteEntry);
        };

        let kind = EntryKind::parse_normalized(raw_kind)
            .ok_or_else(|| LedgerError::InvalidKind(raw_kind.to_string()))?;

        let transaction_date = Self::parse_date("transactionDate", raw_date)?;

        if amount < 0 {
            return Err(LedgerError::NegativeAmount);
        }

        Ok(EntryDraft {
            transaction_date,
            kind,
            category_id: CategoryId(category_id),
            amount,
            note: non_blank(input.note.as_deref()).map(str::to_string),
        })
    }

    /// Checks a new entry against the current running balance.
    ///
    /// INCOME always passes. EXPENSE passes only if `amount <= current_balance`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientBalance` carrying `current_balance`.
    pub fn check_creation(
        draft: &EntryDraft,
        current_balance: i64,
    ) -> Result<(), LedgerError> {
        match draft.kind {
            EntryKind::Expense if draft.amount > current_balance => {
                Err(LedgerError::InsufficientBalance {
                    balance: current_balance,
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks an amendment: the entry's prior contribution is already
    /// removed from `balance_excluding`, and its new contribution must not
    /// drive the total below zero.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientBalance` carrying `balance_excluding`.
    pub fn check_amendment(draft: &EntryDraft, balance_excluding: i64) -> Result<(), LedgerError> {
        let effect = signed_contribution(draft.kind, draft.amount);
        if i128::from(balance_excluding) + i128::from(effect) < 0 {
            return Err(LedgerError::InsufficientBalance {
                balance: balance_excluding,
            });
        }
        Ok(())
    }

    /// Checks that adding the draft to `totals` keeps its kind's total within
    /// `i64`. `totals` must already exclude the entry being amended.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::TotalOverflow` naming the kind that would overflow.
    pub fn check_total_capacity(
        draft: &EntryDraft,
        totals: LedgerTotals,
    ) -> Result<(), LedgerError> {
        let current = match draft.kind {
            EntryKind::Income => totals.income_total,
            EntryKind::Expense => totals.expense_total,
        };
        current
            .checked_add(draft.amount)
            .map(|_| ())
            .ok_or(LedgerError::TotalOverflow {
                kind: draft.kind.as_str(),
            })
    }

    /// Checks a deletion: the balance without the entry must stay non-negative.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientBalance` carrying `balance_excluding`.
    pub fn check_deletion(balance_excluding: i64) -> Result<(), LedgerError> {
        if balance_excluding < 0 {
            return Err(LedgerError::InsufficientBalance {
                balance: balance_excluding,
            });
        }
        Ok(())
    }

    /// Parses a path id.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidId` unless `raw` is a positive integer.
    pub fn parse_entry_id(raw: &str) -> Result<EntryId, LedgerError> {
        raw.parse::<EntryId>()
            .map_err(|_| LedgerError::InvalidId(raw.to_string()))
    }

    /// Parses a `YYYY-MM-DD` date, naming `field` in the error.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` for anything else.
    pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, LedgerError> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            LedgerError::Validation(format!("{field} must be a date in YYYY-MM-DD format"))
        })
    }

    /// Parses history query parameters.
    ///
    /// Blank parameters are treated as absent. An unrecognized kind filter is
    /// ignored rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` for malformed dates or a
    /// non-numeric category id.
    pub fn parse_history_filter(query: &HistoryQuery) -> Result<HistoryFilter, LedgerError> {
        let start_date = non_blank(query.start_date.as_deref())
            .map(|raw| Self::parse_date("startDate", raw))
            .transpose()?;
        let end_date = non_blank(query.end_date.as_deref())
            .map(|raw| Self::parse_date("endDate", raw))
            .transpose()?;

        let kind = non_blank(query.kind.as_deref()).and_then(|raw| {
            let parsed = EntryKind::parse_normalized(raw);
            if parsed.is_none() {
                debug!(kind = %raw, "Ignoring unrecognized kind filter");
            }
            parsed
        });

        let category_id = non_blank(query.category_id.as_deref())
            .map(|raw| {
                raw.parse::<CategoryId>().map_err(|_| {
                    LedgerError::Validation("kategoriId must be a positive integer".to_string())
                })
            })
            .transpose()?;

        Ok(HistoryFilter {
            start_date,
            end_date,
            kind,
            category_id,
        })
    }

    /// Parses a required reporting period.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Validation` if either bound is missing or
    /// malformed, and `LedgerError::InvalidDateRange` if start is after end.
    pub fn parse_period(query: &PeriodQuery) -> Result<DateRange, LedgerError> {
        let (Some(raw_start), Some(raw_end)) = (
            non_blank(query.start_date.as_deref()),
            non_blank(query.end_date.as_deref()),
        ) else {
            return Err(LedgerError::Validation(
                "startDate and endDate are required".to_string(),
            ));
        };

        let start = Self::parse_date("startDate", raw_start)?;
        let end = Self::parse_date("endDate", raw_end)?;

        DateRange::new(start, end).ok_or(LedgerError::InvalidDateRange { start, end })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
