//! Admin allowlist repository.

use sqlx::SqlitePool;

use opencall_core::Permissions;

use super::RepositoryError;
use crate::models::admin::Admin;

/// Internal row type for `admins` queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    email: Option<String>,
    permissions: Option<String>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            email: row.email.unwrap_or_default(),
            permissions: Permissions::new(row.permissions.unwrap_or_default()),
        }
    }
}

/// Repository for the `admins` table.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the admin row for `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT email, permissions
            FROM admins
            WHERE email = ?1
            ORDER BY rowid
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Admin::from))
    }

    /// Insert an admin row for `email` unless one exists.
    ///
    /// Returns `true` when a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn grant_if_absent(
        &self,
        email: &str,
        permissions: &Permissions,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO admins (email, permissions)
            SELECT ?1, ?2
            WHERE NOT EXISTS (SELECT 1 FROM admins WHERE email = ?1)
            ",
        )
        .bind(email)
        .bind(permissions.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_prepare_seeds_default_permissions_verbatim() {
        let pool = memory_pool().await;
        crate::db::prepare(&pool, "admin@opencall.org").await.unwrap();

        let admin = AdminRepository::new(&pool)
            .get_by_email("admin@opencall.org")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(admin.permissions.as_str(), "manageUsers&manageEvents");
    }

    #[tokio::test]
    async fn test_prepare_is_idempotent() {
        let pool = memory_pool().await;
        crate::db::prepare(&pool, "admin@opencall.org").await.unwrap();
        crate::db::prepare(&pool, "admin@opencall.org").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_existing_permissions_are_kept() {
        let pool = memory_pool().await;
        let admins = AdminRepository::new(&pool);

        assert!(
            admins
                .grant_if_absent("admin@opencall.org", &Permissions::new("manageUsers"))
                .await
                .unwrap()
        );
        assert!(
            !admins
                .grant_if_absent("admin@opencall.org", &Permissions::default())
                .await
                .unwrap()
        );

        let admin = admins.get_by_email("admin@opencall.org").await.unwrap().unwrap();
        assert_eq!(admin.permissions.as_str(), "manageUsers");
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let pool = memory_pool().await;
        let admins = AdminRepository::new(&pool);

        assert!(admins.get_by_email("nobody@opencall.org").await.unwrap().is_none());
    }
}
