//! Category registry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use kas_core::access::Operation;
use kas_core::registry::{CategoryInput, RegistryRules};
use kas_db::{CategoryRepository, entities::categories};
use serde_json::{Value, json};

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", put(rename_category).delete(delete_category))
}

fn repository(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

/// GET `/categories` - All categories by name.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<categories::Model>>, ApiError> {
    auth.authorize(Operation::ReadCategories)?;
    Ok(Json(repository(&state).list().await?))
}

/// POST `/categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.authorize(Operation::ManageCategories)?;

    let name = RegistryRules::category_name(&input)?;
    let category = repository(&state).create(&name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT `/categories/{id}` - Rename a category.
async fn rename_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<categories::Model>, ApiError> {
    auth.authorize(Operation::ManageCategories)?;

    let id = RegistryRules::parse_category_id(&raw_id)?;
    let name = RegistryRules::category_name(&input)?;
    let category = repository(&state).rename(id.into_inner(), &name).await?;

    Ok(Json(category))
}

/// DELETE `/categories/{id}` - Delete an unused category.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    auth.authorize(Operation::ManageCategories)?;

    let id = RegistryRules::parse_category_id(&raw_id)?;
    repository(&state).delete(id.into_inner()).await?;

    Ok(Json(json!({ "message": "Category deleted" })))
}
