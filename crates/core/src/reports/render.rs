//! Printable report rendering: fixed-width text and CSV.

use std::fmt::{self, Write as _};

use super::error::ReportError;
use super::types::PeriodReport;

const TITLE: &str = "LAPORAN KAS";
const EMPTY_PERIOD: &str = "Tidak ada transaksi pada periode ini.";
const CSV_HEADER: [&str; 7] = [
    "No",
    "Tanggal",
    "Jenis",
    "Kategori",
    "Keterangan",
    "Nominal",
    "Dicatat Oleh",
];

/// Formats an amount with Indonesian digit grouping, e.g. `Rp 1.500.000`.
#[must_use]
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Renders the report as a fixed-width plain-text document.
///
/// # Errors
///
/// Returns `ReportError::Text` if formatting fails.
pub fn render_text(report: &PeriodReport) -> Result<String, ReportError> {
    let mut out = String::new();
    write_text(&mut out, report)?;
    Ok(out)
}

fn write_text(out: &mut String, report: &PeriodReport) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(
        out,
        "Periode: {} s/d {}",
        report.start_date, report.end_date
    )?;
    writeln!(out)?;
    writeln!(out, "Total Pemasukan  : {}", format_rupiah(report.income_total))?;
    writeln!(out, "Total Pengeluaran: {}", format_rupiah(report.expense_total))?;
    writeln!(out, "Saldo Periode    : {}", format_rupiah(report.period_balance))?;
    writeln!(out)?;
    writeln!(out, "Daftar Transaksi")?;

    let header = format!(
        "{:<4} {:<10} {:<8} {:<20} {:<28} {:>16} {}",
        "No", "Tanggal", "Jenis", "Kategori", "Keterangan", "Nominal", "Dicatat Oleh"
    );
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;

    if report.entries.is_empty() {
        return writeln!(out, "{EMPTY_PERIOD}");
    }

    for (index, entry) in report.entries.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<10} {:<8} {:<20} {:<28} {:>16} {}",
            index + 1,
            entry.transaction_date,
            entry.kind.as_str(),
            fit(entry.category_name.as_deref().unwrap_or("-"), 20),
            fit(entry.note.as_deref().unwrap_or("-"), 28),
            format_rupiah(entry.amount),
            entry.recorded_by_name.as_deref().unwrap_or("-"),
        )?;
    }

    Ok(())
}

/// Renders the report entries as CSV with a header row.
///
/// # Errors
///
/// Returns `ReportError` if the CSV writer fails.
pub fn render_csv(report: &PeriodReport) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for (index, entry) in report.entries.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            entry.transaction_date.to_string(),
            entry.kind.as_str().to_string(),
            entry.category_name.clone().unwrap_or_default(),
            entry.note.clone().unwrap_or_default(),
            entry.amount.to_string(),
            entry.recorded_by_name.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Render(e.to_string()))
}

/// Truncates to `width` characters, marking the cut with `~`.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
