//! Cash ledger rules.
//!
//! This module implements the core ledger functionality:
//! - Entry kinds and raw/validated entry types
//! - Running balance arithmetic
//! - Input validation and the non-negative balance invariant
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{LedgerTotals, signed_contribution};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    DateRange, EntryDraft, EntryInput, EntryKind, EntryRecord, HistoryFilter, HistoryQuery,
    PeriodQuery,
};
