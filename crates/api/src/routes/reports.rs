//! Period report routes: JSON, printable text and CSV.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use kas_core::access::Operation;
use kas_core::ledger::{DateRange, LedgerService, PeriodQuery};
use kas_core::reports::{PeriodReport, ReportFormat, ReportService, render_csv, render_text};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(get_report))
        .route("/reports/print", get(print_report))
        .route("/reports/csv", get(export_csv))
}

/// GET `/reports` - Period totals and the entries in the period.
async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PeriodReport>, ApiError> {
    let (_, report) = load_report(&state, &auth, &query).await?;
    Ok(Json(report))
}

/// GET `/reports/print` - Plain-text printable report as an attachment.
async fn print_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ApiError> {
    let (range, report) = load_report(&state, &auth, &query).await?;
    Ok(attachment(range, ReportFormat::Text, render_text(&report)?))
}

/// GET `/reports/csv` - CSV export as an attachment.
async fn export_csv(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, ApiError> {
    let (range, report) = load_report(&state, &auth, &query).await?;
    let body = render_csv(&report)?;
    Ok(attachment(range, ReportFormat::Csv, body))
}

async fn load_report(
    state: &AppState,
    auth: &AuthUser,
    query: &PeriodQuery,
) -> Result<(DateRange, PeriodReport), ApiError> {
    auth.authorize(Operation::ReadReport)?;

    let range = LedgerService::parse_period(query)?;
    let totals = state.entries.period_totals(range).await?;
    let entries = state.entries.list_period(range).await?;

    info!(
        start = %range.start(),
        end = %range.end(),
        entries = entries.len(),
        "Period report generated"
    );
    Ok((range, ReportService::build_period_report(range, totals, entries)))
}

fn attachment(range: DateRange, format: ReportFormat, body: String) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        ReportService::file_name(range, format)
    );
    (
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
