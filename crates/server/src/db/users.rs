//! User repository for database operations.
//!
//! This module provides database access for registered volunteers. Lookups
//! match the email column exactly (case-sensitive) against the sanitized
//! address.

use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::user::{NewUser, User};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `users` queries.
///
/// Every column is nullable in the legacy schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    email: Option<String>,
    password: Option<String>,
    fname: Option<String>,
    lname: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            email: row.email.unwrap_or_default(),
            password_hash: row.password.unwrap_or_default(),
            first_name: row.fname.unwrap_or_default(),
            last_name: row.lname.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the first user stored under `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT email, password, fname, lname
            FROM users
            WHERE email = ?1
            ORDER BY rowid
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Insert a user unless a row with the same email already exists.
    ///
    /// The existence check and the insert are one statement, so two
    /// concurrent registrations for the same email cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_if_absent(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO users (email, password, fname, lname)
            SELECT ?1, ?2, ?3, ?4
            WHERE NOT EXISTS (SELECT 1 FROM users WHERE email = ?1)
            ",
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        Ok(User {
            email: user.email.as_str().to_owned(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.as_str().to_owned(),
            last_name: user.last_name.as_str().to_owned(),
        })
    }

    /// Count rows stored under `email`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_email(&self, email: &str) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?1")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// List every registered user in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT email, password, fname, lname FROM users ORDER BY rowid",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
