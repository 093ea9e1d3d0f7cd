//! Report error types.

use thiserror::Error;

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    /// Text formatting failed.
    #[error("Failed to write text report: {0}")]
    Text(#[from] std::fmt::Error),

    /// The rendered CSV buffer could not be recovered or was not UTF-8.
    #[error("Failed to render report: {0}")]
    Render(String),
}
