//! Authentication routes.

use axum::{Json, Router, extract::State, routing::post};
use kas_core::auth::{Role, UserStatus, verify_password};
use kas_db::UserRepository;
use kas_shared::auth::{LoginRequest, LoginResponse, UserInfo};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::ApiJson};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Authenticate user and return an access token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(email), Some(password)) = (
        payload.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation("email and password are required"));
    };

    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_email(email).await? else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(ApiError::INVALID_CREDENTIALS);
    };

    if UserStatus::from(user.status) != UserStatus::Active {
        info!(user_id = user.id, "Login attempt on disabled account");
        return Err(ApiError::ACCOUNT_DISABLED);
    }

    if !verify_password(password, &user.password_hash)? {
        info!(user_id = user.id, "Failed login attempt - invalid password");
        return Err(ApiError::INVALID_CREDENTIALS);
    }

    let role = Role::from(user.role);
    let token = state
        .jwt_service
        .generate_access_token(user.id, &user.username, role.as_str())?;

    info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        expires_in: state.jwt_service.access_token_expires_in(),
        user: UserInfo::from(user),
    }))
}
