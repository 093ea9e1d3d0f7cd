//! Seeds the first chair account.
//!
//! Reads `KAS_SEED_USERNAME`, `KAS_SEED_EMAIL` and `KAS_SEED_PASSWORD`
//! (username defaults to `ketua`). Does nothing if a chair already exists.
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kas_core::auth::{Role, hash_password};
use kas_core::registry::{NewUserInput, RegistryRules};
use kas_db::UserRepository;
use kas_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = kas_db::connect(&config.database.url).await?;
    let users = UserRepository::new(db);

    if users.chair_exists().await? {
        info!("A chair account already exists, skipping");
        return Ok(());
    }

    let input = NewUserInput {
        username: Some(env_or("KAS_SEED_USERNAME", "ketua")),
        email: std::env::var("KAS_SEED_EMAIL").ok(),
        password: std::env::var("KAS_SEED_PASSWORD").ok(),
        role: Some(Role::Chair.as_str().to_string()),
    };
    if input.email.is_none() || input.password.is_none() {
        bail!("KAS_SEED_EMAIL and KAS_SEED_PASSWORD must be set");
    }

    let user = RegistryRules::new_user(&input)?;
    let password_hash = hash_password(&user.password)?;
    let created = users.create(&user, &password_hash).await?;

    info!(user_id = created.id, username = %created.username, "Chair account created");
    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
