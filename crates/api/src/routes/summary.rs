//! Overall balance summary.

use axum::{Json, Router, extract::State, routing::get};
use kas_core::access::Operation;
use kas_core::reports::{BalanceSummary, ReportService};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the summary route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/summary", get(get_summary))
}

/// GET `/summary` - Income, expense and balance over every entry.
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BalanceSummary>, ApiError> {
    auth.authorize(Operation::ReadSummary)?;

    let totals = state.entries.overall_totals().await?;

    Ok(Json(ReportService::build_summary(totals)))
}
