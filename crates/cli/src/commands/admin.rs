//! Admin allowlist commands.
//!
//! # Usage
//!
//! ```bash
//! opencall-cli admin grant -e admin@example.com -p "manageUsers&manageEvents"
//! opencall-cli admin show -e admin@example.com
//! ```

use opencall_core::{Email, EmailError, Permissions};
use opencall_server::db::{AdminRepository, RepositoryError, ensure_schema};
use sqlx::SqlitePool;
use thiserror::Error;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Schema creation failed.
    #[error("Schema error: {0}")]
    Schema(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email {0:?}: {1}")]
    InvalidEmail(String, EmailError),

    /// No admin row for the email.
    #[error("No admin with email: {0}")]
    NotFound(String),
}

/// Sanitize and validate an email the same way registration does, so the
/// row matches the email a volunteer logs in with.
fn admin_email(raw: &str) -> Result<Email, AdminError> {
    Email::parse(raw).map_err(|e| AdminError::InvalidEmail(raw.to_owned(), e))
}

/// Add an admin row unless one already exists for `email`.
///
/// An existing row keeps its permissions.
///
/// # Errors
///
/// Returns `AdminError::InvalidEmail` if the email is not usable, or a
/// database error.
pub async fn grant(pool: &SqlitePool, email: &str, permissions: String) -> Result<(), AdminError> {
    let email = admin_email(email)?;
    ensure_schema(pool).await?;

    let inserted = AdminRepository::new(pool)
        .grant_if_absent(email.as_str(), &Permissions::new(permissions))
        .await?;

    if inserted {
        tracing::info!(email = %email, "Admin granted");
    } else {
        tracing::warn!(email = %email, "Admin already exists; permissions left unchanged");
    }

    Ok(())
}

/// Print the raw permission string stored for `email`.
///
/// # Errors
///
/// Returns `AdminError::NotFound` if the email is not an admin.
#[allow(clippy::print_stdout)]
pub async fn show(pool: &SqlitePool, email: &str) -> Result<(), AdminError> {
    let email = admin_email(email)?;

    let admin = AdminRepository::new(pool)
        .get_by_email(email.as_str())
        .await?
        .ok_or_else(|| AdminError::NotFound(email.to_string()))?;

    println!("{}", admin.permissions);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_email_is_sanitized() {
        let email = admin_email(" lead+ops@example.com ").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(email.as_str(), "leadops@example.com");
    }

    #[test]
    fn test_admin_email_rejects_bad_shape() {
        assert!(matches!(
            admin_email("not-an-email"),
            Err(AdminError::InvalidEmail(_, EmailError::InvalidShape))
        ));
    }
}
