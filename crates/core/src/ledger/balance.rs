//! Running balance arithmetic.
//!
//! INCOME contributes `+amount`, EXPENSE contributes `-amount`. The store
//! computes the same sums in SQL; these functions are the reference used by
//! the invariant checks and the property tests.

use serde::{Deserialize, Serialize};

use super::types::EntryKind;

/// Signed contribution of one entry to the running balance.
#[must_use]
pub const fn signed_contribution(kind: EntryKind, amount: i64) -> i64 {
    match kind {
        EntryKind::Income => amount,
        EntryKind::Expense => -amount,
    }
}

/// Income and expense totals over some set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of INCOME amounts.
    pub income_total: i64,
    /// Sum of EXPENSE amounts.
    pub expense_total: i64,
}

impl LedgerTotals {
    /// Creates totals from precomputed sums.
    #[must_use]
    pub const fn new(income_total: i64, expense_total: i64) -> Self {
        Self {
            income_total,
            expense_total,
        }
    }

    /// Adds one entry to the totals.
    pub fn add(&mut self, kind: EntryKind, amount: i64) {
        match kind {
            EntryKind::Income => self.income_total += amount,
            EntryKind::Expense => self.expense_total += amount,
        }
    }

    /// Income minus expense.
    #[must_use]
    pub const fn balance(&self) -> i64 {
        self.income_total - self.expense_total
    }
}

impl FromIterator<(EntryKind, i64)> for LedgerTotals {
    fn from_iter<I: IntoIterator<Item = (EntryKind, i64)>>(iter: I) -> Self {
        let mut totals = Self::default();
        for (kind, amount) in iter {
            totals.add(kind, amount);
        }
        totals
    }
}

/// Running balance over `entries`, optionally leaving one out by key.
#[must_use]
pub fn balance_excluding<K: PartialEq>(entries: &[(K, EntryKind, i64)], exclude: Option<&K>) -> i64 {
    entries
        .iter()
        .filter(|(key, _, _)| exclude != Some(key))
        .map(|(_, kind, amount)| signed_contribution(*kind, *amount))
        .sum()
}
