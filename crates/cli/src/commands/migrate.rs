//! Schema command.
//!
//! The server creates its tables at startup too; this exists so an operator
//! can prepare a database file before the first launch.

use sqlx::SqlitePool;

/// Create the `users` and `admins` tables if they do not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring schema...");
    opencall_server::db::ensure_schema(pool).await?;
    tracing::info!("Schema ready");
    Ok(())
}
