//! Test harness: the full router over a migrated in-memory SQLite database.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use kas_api::{AppState, create_router};
use kas_core::auth::{Role, hash_password};
use kas_core::registry::NewUser;
use kas_db::migration::{Migrator, MigratorTrait};
use kas_db::{CategoryRepository, UserRepository};
use kas_shared::{JwtConfig, JwtService};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";
pub const PASSWORD: &str = "rahasia123";

/// A running app plus bearer tokens for one account per role.
pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
    pub jwt: JwtService,
    pub chair: String,
    pub treasurer: String,
    pub member: String,
    pub chair_id: i32,
    pub treasurer_id: i32,
    pub member_id: i32,
}

pub fn jwt_service(expires_secs: i64) -> JwtService {
    JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_secs: expires_secs,
    })
}

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

async fn seed_user(db: &DatabaseConnection, username: &str, role: Role) -> i32 {
    let hash = hash_password(PASSWORD).expect("Failed to hash password");
    UserRepository::new(db.clone())
        .create(
            &NewUser {
                username: username.to_string(),
                email: format!("{username}@masjid.test"),
                password: PASSWORD.to_string(),
                role,
            },
            &hash,
        )
        .await
        .expect("Failed to create user")
        .id
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_deletion(false).await
    }

    pub async fn with_deletion(allow_entry_deletion: bool) -> Self {
        let db = setup_db().await;
        let chair_id = seed_user(&db, "ketua", Role::Chair).await;
        let treasurer_id = seed_user(&db, "bendahara", Role::Treasurer).await;
        let member_id = seed_user(&db, "jamaah", Role::Member).await;

        let jwt = jwt_service(3600);
        let token = |id: i32, name: &str, role: Role| {
            jwt.generate_access_token(id, name, role.as_str())
                .expect("Failed to generate token")
        };
        let chair = token(chair_id, "ketua", Role::Chair);
        let treasurer = token(treasurer_id, "bendahara", Role::Treasurer);
        let member = token(member_id, "jamaah", Role::Member);

        let state = AppState::new(db.clone(), jwt.clone(), allow_entry_deletion);
        Self {
            router: create_router(state),
            db,
            jwt,
            chair,
            treasurer,
            member,
            chair_id,
            treasurer_id,
            member_id,
        }
    }

    pub async fn category(&self, name: &str) -> i32 {
        CategoryRepository::new(self.db.clone())
            .create(name)
            .await
            .expect("Failed to create category")
            .id
    }

    /// Sends a request and returns the status and the raw body.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        (status, headers, bytes.to_vec())
    }

    /// Sends a request and parses the JSON response body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = self.send_raw(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, json)
    }
}
