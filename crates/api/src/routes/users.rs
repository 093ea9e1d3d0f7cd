//! User registry routes. Chair only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
};
use kas_core::access::Operation;
use kas_core::auth::hash_password;
use kas_core::registry::{
    NewUserInput, PasswordResetInput, RegistryRules, StatusInput, UserUpdateInput,
};
use kas_db::UserRepository;
use kas_shared::auth::UserInfo;
use kas_shared::types::UserId;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/users/{id}/status", patch(set_status))
        .route("/users/{id}/reset-password", patch(reset_password))
}

fn repository(state: &AppState) -> UserRepository {
    UserRepository::new((*state.db).clone())
}

/// GET `/users` - All accounts by id.
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let users = repository(&state).list().await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// POST `/users` - Create an active account.
async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<NewUserInput>,
) -> Result<impl IntoResponse, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let user = RegistryRules::new_user(&input)?;
    let password_hash = hash_password(&user.password)?;
    let created = repository(&state).create(&user, &password_hash).await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(created))))
}

/// PUT `/users/{id}` - Update username, email and role.
async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<UserUpdateInput>,
) -> Result<Json<UserInfo>, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let id = RegistryRules::parse_user_id(&raw_id)?;
    let profile = RegistryRules::user_profile(&input)?;
    let updated = repository(&state)
        .update_profile(id.into_inner(), &profile)
        .await?;

    Ok(Json(UserInfo::from(updated)))
}

/// PATCH `/users/{id}/status` - Activate or deactivate another account.
async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<StatusInput>,
) -> Result<Json<Value>, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let id = RegistryRules::parse_user_id(&raw_id)?;
    let status = RegistryRules::status(&input)?;
    ensure_not_self(&auth, id)?;

    repository(&state).set_status(id.into_inner(), status).await?;

    Ok(Json(json!({ "id": id, "status": status })))
}

/// PATCH `/users/{id}/reset-password` - Replace an account's password.
async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    ApiJson(input): ApiJson<PasswordResetInput>,
) -> Result<Json<Value>, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let id = RegistryRules::parse_user_id(&raw_id)?;
    let password = RegistryRules::password_reset(&input)?;
    let password_hash = hash_password(&password)?;
    repository(&state)
        .set_password_hash(id.into_inner(), &password_hash)
        .await?;

    Ok(Json(json!({ "message": "Password reset" })))
}

/// DELETE `/users/{id}` - Delete an account that never recorded an entry.
async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    auth.authorize(Operation::ManageUsers)?;

    let id = RegistryRules::parse_user_id(&raw_id)?;
    ensure_not_self(&auth, id)?;
    repository(&state).delete(id.into_inner()).await?;

    Ok(Json(json!({ "message": "User deleted" })))
}

fn ensure_not_self(auth: &AuthUser, target: UserId) -> Result<(), ApiError> {
    RegistryRules::ensure_not_self(auth.user_id().into_inner(), target.into_inner())?;
    Ok(())
}
