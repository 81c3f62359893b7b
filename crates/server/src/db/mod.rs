//! Database operations for the OpenCall SQLite store.
//!
//! # Database: `database.db`
//!
//! ## Tables
//!
//! - `users` - Registered volunteers (`email`, `password`, `fname`, `lname`)
//! - `admins` - Admin allowlist (`email`, `permissions`)
//!
//! Neither table has a primary key, index or uniqueness constraint; the
//! column names match databases created by earlier OpenCall releases.
//!
//! # Schema
//!
//! Tables are created idempotently at startup by [`prepare`], or explicitly via:
//! ```bash
//! cargo run -p opencall-cli -- migrate
//! ```

pub mod admins;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

use opencall_core::Permissions;

pub use admins::AdminRepository;
pub use users::UserRepository;

const CREATE_USERS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS users (email TEXT, password TEXT, fname TEXT, lname TEXT)";

const CREATE_ADMINS_TABLE: &str = "CREATE TABLE IF NOT EXISTS admins (email TEXT, permissions TEXT)";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row with the same key already exists.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool, creating the database file if needed.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create the `users` and `admins` tables if they do not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_ADMINS_TABLE).execute(pool).await?;
    Ok(())
}

/// Startup preparation: ensure the schema and seed the configured admin.
///
/// The admin row is inserted with [`Permissions::DEFAULT`] only when no row
/// for `admin_email` exists; an existing row keeps its permissions.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn prepare(pool: &SqlitePool, admin_email: &str) -> Result<(), RepositoryError> {
    ensure_schema(pool).await?;

    let seeded = AdminRepository::new(pool)
        .grant_if_absent(admin_email, &Permissions::default())
        .await?;

    if seeded {
        tracing::info!(admin_email, "Seeded admin account");
    } else {
        tracing::debug!(admin_email, "Admin account already present");
    }

    Ok(())
}
