//! Period reports.
//!
//! This module provides pure business logic for reports:
//! - Period report and overall summary assembly
//! - Plain-text and CSV rendering of a period report

pub mod error;
pub mod render;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use render::{format_rupiah, render_csv, render_text};
pub use service::ReportService;
pub use types::*;
