//! Shared setup for repository tests: a migrated in-memory SQLite database.

#![allow(dead_code)]

use kas_core::auth::Role;
use kas_core::registry::NewUser;
use kas_db::migration::{Migrator, MigratorTrait};
use kas_db::{CategoryRepository, UserRepository};
use kas_shared::types::{CategoryId, UserId};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tempfile::TempDir;

/// Opens a fresh in-memory database with the schema applied.
///
/// The pool holds exactly one connection: every in-memory SQLite connection
/// is its own database.
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

/// Opens a migrated SQLite file behind a pool of several connections, so
/// concurrent transactions really overlap. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn setup_pooled_db() -> (DatabaseConnection, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("kas.db").display());

    let mut options = ConnectOptions::new(url);
    options.max_connections(8).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open database file");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    (db, dir)
}

/// Creates a user with the given role.
pub async fn seed_user(db: &DatabaseConnection, username: &str, role: Role) -> UserId {
    let user = UserRepository::new(db.clone())
        .create(
            &NewUser {
                username: username.to_string(),
                email: format!("{username}@masjid.test"),
                password: "unused-in-tests".to_string(),
                role,
            },
            "$argon2id$test_hash",
        )
        .await
        .expect("Failed to create user");
    UserId(user.id)
}

/// Creates a category.
pub async fn seed_category(db: &DatabaseConnection, name: &str) -> CategoryId {
    let category = CategoryRepository::new(db.clone())
        .create(name)
        .await
        .expect("Failed to create category");
    CategoryId(category.id)
}
