//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Request extractors
//! - Error to response mapping

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use axum::Router;
use kas_db::EntryRepository;
use kas_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Entry repository. Every clone shares the ledger write lock, so the
    /// state must hold exactly one instance.
    pub entries: EntryRepository,
    /// Whether `DELETE /transactions/{id}` is enabled.
    pub allow_entry_deletion: bool,
}

impl AppState {
    /// Builds the state around one connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService, allow_entry_deletion: bool) -> Self {
        Self {
            entries: EntryRepository::new(db.clone()),
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            allow_entry_deletion,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    routes::api_routes_with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
