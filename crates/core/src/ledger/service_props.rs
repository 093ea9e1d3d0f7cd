//! Property-based tests for `LedgerService` against an in-memory ledger.
//!
//! The model applies each mutation only if the service accepts it, with the
//! balance recomputed from the stored entries every time, exactly as the
//! store does inside its write transaction.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::balance::{LedgerTotals, balance_excluding};
use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{EntryInput, EntryKind, PeriodQuery};

#[derive(Debug, Default)]
struct MemoryLedger {
    next_id: u32,
    entries: Vec<(u32, EntryKind, i64, NaiveDate)>,
}

impl MemoryLedger {
    fn rows(&self) -> Vec<(u32, EntryKind, i64)> {
        self.entries.iter().map(|(id, k, a, _)| (*id, *k, *a)).collect()
    }

    fn balance(&self, exclude: Option<u32>) -> i64 {
        balance_excluding(&self.rows(), exclude.as_ref())
    }

    fn create(&mut self, input: &EntryInput) -> Result<u32, LedgerError> {
        let draft = LedgerService::validate_input(input)?;
        LedgerService::check_creation(&draft, self.balance(None))?;
        self.next_id += 1;
        self.entries
            .push((self.next_id, draft.kind, draft.amount, draft.transaction_date));
        Ok(self.next_id)
    }

    fn amend(&mut self, id: u32, input: &EntryInput) -> Result<(), LedgerError> {
        let draft = LedgerService::validate_input(input)?;
        let position = self
            .entries
            .iter()
            .position(|(eid, ..)| *eid == id)
            .ok_or(LedgerError::EntryNotFound(0))?;
        LedgerService::check_amendment(&draft, self.balance(Some(id)))?;
        self.entries[position] = (id, draft.kind, draft.amount, draft.transaction_date);
        Ok(())
    }

    fn period_totals(&self, start: NaiveDate, end: NaiveDate) -> LedgerTotals {
        self.entries
            .iter()
            .filter(|(_, _, _, date)| start <= *date && *date <= end)
            .map(|(_, kind, amount, _)| (*kind, *amount))
            .collect()
    }
}

fn entry(date: &str, kind: EntryKind, amount: i64) -> EntryInput {
    EntryInput {
        transaction_date: Some(date.to_string()),
        kind: Some(kind.as_str().to_string()),
        category_id: Some(1),
        amount: Some(amount),
        note: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Debug, Clone)]
enum Op {
    Create(EntryKind, i64),
    Amend(usize, EntryKind, i64),
}

fn kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![Just(EntryKind::Income), Just(EntryKind::Expense)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (kind_strategy(), 0i64..10_000).prop_map(|(k, a)| Op::Create(k, a)),
        (any::<usize>(), kind_strategy(), 0i64..10_000).prop_map(|(i, k, a)| Op::Amend(i, k, a)),
    ]
}

proptest! {
    /// Non-negativity: no sequence of accepted creations and amendments
    /// leaves a negative running balance.
    #[test]
    fn prop_balance_never_negative(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut ledger = MemoryLedger::default();

        for op in ops {
            match op {
                Op::Create(kind, amount) => {
                    let _ = ledger.create(&entry("2024-03-01", kind, amount));
                }
                Op::Amend(pick, kind, amount) => {
                    if !ledger.entries.is_empty() {
                        let id = ledger.entries[pick % ledger.entries.len()].0;
                        let _ = ledger.amend(id, &entry("2024-03-01", kind, amount));
                    }
                }
            }
            prop_assert!(ledger.balance(None) >= 0);
        }
    }

    /// Idempotent rejection: a rejected creation leaves the ledger untouched
    /// and reports the balance it observed.
    #[test]
    fn prop_rejected_creation_does_not_mutate(
        income in 0i64..10_000,
        overdraw in 1i64..10_000,
    ) {
        let mut ledger = MemoryLedger::default();
        ledger.create(&entry("2024-03-01", EntryKind::Income, income)).unwrap();
        let before = ledger.entries.clone();

        let result = ledger.create(&entry("2024-03-02", EntryKind::Expense, income + overdraw));

        prop_assert_eq!(result, Err(LedgerError::InsufficientBalance { balance: income }));
        prop_assert_eq!(&ledger.entries, &before);
    }

    /// An inverted period is rejected regardless of the dates involved.
    #[test]
    fn prop_inverted_period_rejected(start_offset in 1i64..3650, base in 0i64..20_000) {
        let end = date(2000, 1, 1) + chrono::Duration::days(base);
        let start = end + chrono::Duration::days(start_offset);
        let query = PeriodQuery {
            start_date: Some(start.format("%Y-%m-%d").to_string()),
            end_date: Some(end.format("%Y-%m-%d").to_string()),
        };
        prop_assert_eq!(
            LedgerService::parse_period(&query),
            Err(LedgerError::InvalidDateRange { start, end })
        );
    }
}

#[test]
fn scenario_expenses_bounded_by_income() {
    let mut ledger = MemoryLedger::default();

    assert_eq!(
        ledger.create(&entry("2024-01-01", EntryKind::Expense, 100)),
        Err(LedgerError::InsufficientBalance { balance: 0 })
    );
    ledger.create(&entry("2024-01-02", EntryKind::Income, 500)).unwrap();
    assert_eq!(ledger.balance(None), 500);
    ledger.create(&entry("2024-01-03", EntryKind::Expense, 500)).unwrap();
    assert_eq!(ledger.balance(None), 0);
    assert_eq!(
        ledger.create(&entry("2024-01-04", EntryKind::Expense, 1)),
        Err(LedgerError::InsufficientBalance { balance: 0 })
    );
    assert_eq!(ledger.entries.len(), 2);
}

#[test]
fn scenario_amending_only_income_into_expense_is_rejected() {
    let mut ledger = MemoryLedger::default();
    let id = ledger.create(&entry("2024-01-01", EntryKind::Income, 1000)).unwrap();
    assert_eq!(id, 1);

    assert_eq!(
        ledger.amend(id, &entry("2024-01-01", EntryKind::Expense, 1000)),
        Err(LedgerError::InsufficientBalance { balance: 0 })
    );
    assert_eq!(ledger.balance(None), 1000);
}

#[test]
fn scenario_period_totals_are_restricted_to_range() {
    let mut ledger = MemoryLedger::default();
    ledger.create(&entry("2024-01-05", EntryKind::Income, 300)).unwrap();
    ledger.create(&entry("2024-02-10", EntryKind::Expense, 100)).unwrap();

    let january = ledger.period_totals(date(2024, 1, 1), date(2024, 1, 31));

    assert_eq!(january.income_total, 300);
    assert_eq!(january.expense_total, 0);
    assert_eq!(january.balance(), 300);
}
