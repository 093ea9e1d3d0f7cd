//! Error to HTTP response mapping.
//!
//! Every handler returns `Result<_, ApiError>`. Client errors carry their
//! own message; store and internal failures are logged and reported as an
//! opaque message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kas_core::access::AccessError;
use kas_core::auth::PasswordError;
use kas_core::ledger::LedgerError;
use kas_core::registry::RegistryError;
use kas_core::reports::ReportError;
use kas_db::{CategoryError, EntryError, UserError};
use kas_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

const OPAQUE_MESSAGE: &str = "An error occurred";

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Ledger rule or lookup failure.
    Ledger(LedgerError),
    /// Category or user registry failure.
    Registry(RegistryError),
    /// Role lacks the capability.
    Access(AccessError),
    /// Generic application error.
    App(AppError),
    /// Authentication failure with a fixed code.
    Auth {
        /// 401 or 403.
        status: StatusCode,
        /// Machine-readable code.
        code: &'static str,
        /// Human-readable message.
        message: &'static str,
    },
}

impl ApiError {
    /// Unknown email or wrong password.
    pub const INVALID_CREDENTIALS: Self = Self::Auth {
        status: StatusCode::UNAUTHORIZED,
        code: "invalid_credentials",
        message: "Invalid email or password",
    };

    /// Valid credentials on an inactive account.
    pub const ACCOUNT_DISABLED: Self = Self::Auth {
        status: StatusCode::FORBIDDEN,
        code: "account_disabled",
        message: "This account has been disabled",
    };

    /// Builds a 400 validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::App(AppError::Validation(message.into()))
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        let code = match self {
            Self::Ledger(e) => e.http_status_code(),
            Self::Registry(e) => e.http_status_code(),
            Self::Access(_) => 403,
            Self::App(e) => e.status_code(),
            Self::Auth { status, .. } => return *status,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Access(_) => "FORBIDDEN",
            Self::App(e) => e.error_code(),
            Self::Auth { code, .. } => code,
        }
    }

    fn is_server_error(&self) -> bool {
        match self {
            Self::Ledger(e) => e.is_server_error(),
            Self::App(e) => e.is_server_error(),
            Self::Registry(_) | Self::Access(_) | Self::Auth { .. } => false,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Ledger(e) => e.to_string(),
            Self::Registry(e) => e.to_string(),
            Self::Access(e) => e.to_string(),
            Self::App(AppError::Validation(msg)) => msg.clone(),
            Self::App(e) => e.to_string(),
            Self::Auth { message, .. } => (*message).to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let message = if self.is_server_error() {
            error!(error = %self.message(), code, "Request failed");
            OPAQUE_MESSAGE.to_string()
        } else {
            self.message()
        };

        let body = match self {
            Self::Ledger(LedgerError::InsufficientBalance { balance }) => json!({
                "error": code,
                "message": message,
                "saldoSekarang": balance,
            }),
            _ => json!({ "error": code, "message": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        Self::Ledger(e)
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self::App(e)
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self::App(AppError::Database(e.to_string()))
    }
}

impl From<EntryError> for ApiError {
    fn from(e: EntryError) -> Self {
        match e {
            EntryError::Ledger(e) => Self::Ledger(e),
            EntryError::Database(e) => e.into(),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(e: CategoryError) -> Self {
        match e {
            CategoryError::Registry(e) => Self::Registry(e),
            CategoryError::Database(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::Registry(e) => Self::Registry(e),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::App(AppError::Internal(e.to_string()))
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self::App(AppError::Internal(e.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        Self::App(AppError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_insufficient_balance_carries_balance() {
        let (status, body) =
            body_json(LedgerError::InsufficientBalance { balance: 250 }.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INSUFFICIENT_BALANCE");
        assert_eq!(body["saldoSekarang"], 250);
    }

    #[tokio::test]
    async fn test_store_failures_are_opaque() {
        let (status, body) =
            body_json(DbErr::Custom("connection refused at 10.0.0.3".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], OPAQUE_MESSAGE);
        assert!(body.get("saldoSekarang").is_none());
    }

    #[tokio::test]
    async fn test_validation_message_is_passed_through() {
        let (status, body) = body_json(ApiError::validation("email is required")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "email is required");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(LedgerError::EntryDeletionDisabled).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(RegistryError::UserNotFound(3)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::INVALID_CREDENTIALS.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::ACCOUNT_DISABLED.status(), StatusCode::FORBIDDEN);
    }
}
