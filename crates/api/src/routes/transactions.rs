//! Ledger entry routes.
//!
//! Field validation happens here, before any store access; the balance
//! invariant and reference checks run inside the repository's locked
//! transaction.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use kas_core::access::Operation;
use kas_core::ledger::{EntryInput, EntryRecord, HistoryQuery, LedgerError, LedgerService};
use serde_json::{Value, json};
use tracing::warn;

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_entries).post(create_entry))
        .route("/transactions/{id}", put(amend_entry).delete(delete_entry))
}

/// GET `/transactions` - Filtered history, newest first.
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<EntryRecord>>, ApiError> {
    auth.authorize(Operation::ReadEntries)?;

    let filter = LedgerService::parse_history_filter(&query)?;
    let entries = state.entries.list_history(&filter).await?;

    Ok(Json(entries))
}

/// POST `/transactions` - Record an entry for the caller.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<EntryInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.authorize(Operation::CreateEntry)?;

    let draft = LedgerService::validate_input(&input)?;
    let record = state.entries.create(&draft, auth.user_id()).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT `/transactions/{id}` - Amend an entry.
async fn amend_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<EntryInput>,
) -> Result<Json<EntryRecord>, ApiError> {
    auth.authorize(Operation::AmendEntry)?;

    let id = LedgerService::parse_entry_id(&raw_id)?;
    let draft = LedgerService::validate_input(&input)?;
    let record = state.entries.amend(id, &draft).await?;

    Ok(Json(record))
}

/// DELETE `/transactions/{id}` - Delete an entry when enabled by config.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    auth.authorize(Operation::DeleteEntry)?;

    let id = LedgerService::parse_entry_id(&raw_id)?;
    if !state.allow_entry_deletion {
        warn!(entry_id = %id, user_id = %auth.user_id(), "Entry deletion attempted while disabled");
        return Err(LedgerError::EntryDeletionDisabled.into());
    }

    state.entries.delete(id).await?;

    Ok(Json(json!({ "message": "Entry deleted" })))
}
