//! Report generation service.

use crate::ledger::{DateRange, EntryRecord, LedgerTotals};

use super::types::{BalanceSummary, PeriodReport, ReportFormat};

/// Service for assembling reports from store aggregates.
pub struct ReportService;

impl ReportService {
    /// Builds the period report from the period totals and the entries in
    /// the range (already ordered oldest first by the store).
    #[must_use]
    pub fn build_period_report(
        range: DateRange,
        totals: LedgerTotals,
        entries: Vec<EntryRecord>,
    ) -> PeriodReport {
        PeriodReport {
            start_date: range.start(),
            end_date: range.end(),
            income_total: totals.income_total,
            expense_total: totals.expense_total,
            period_balance: totals.balance(),
            entries,
        }
    }

    /// Builds the overall balance summary.
    #[must_use]
    pub const fn build_summary(totals: LedgerTotals) -> BalanceSummary {
        BalanceSummary {
            income_total: totals.income_total,
            expense_total: totals.expense_total,
            balance: totals.balance(),
        }
    }

    /// Download file name, e.g. `laporan_kas_2024-01-01_sd_2024-01-31.csv`.
    #[must_use]
    pub fn file_name(range: DateRange, format: ReportFormat) -> String {
        format!(
            "laporan_kas_{}_sd_{}.{}",
            range.start(),
            range.end(),
            format.extension()
        )
    }
}
