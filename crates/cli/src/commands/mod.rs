//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod users;

use secrecy::SecretString;
use sqlx::SqlitePool;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";

/// Open the database named by `OPENCALL_DATABASE_URL`.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened.
pub async fn connect() -> Result<SqlitePool, sqlx::Error> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("OPENCALL_DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

    tracing::info!("Connecting to database...");
    opencall_server::db::create_pool(&SecretString::from(database_url)).await
}
