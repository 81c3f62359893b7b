//! Volunteer listing.

use opencall_server::db::{RepositoryError, UserRepository};
use sqlx::SqlitePool;

/// Print every registered volunteer as `email<TAB>first<TAB>last`.
///
/// Password hashes are never printed.
///
/// # Errors
///
/// Returns `RepositoryError` if the query fails.
#[allow(clippy::print_stdout)]
pub async fn list(pool: &SqlitePool) -> Result<(), RepositoryError> {
    let users = UserRepository::new(pool).list_all().await?;

    for user in &users {
        println!("{}\t{}\t{}", user.email, user.first_name, user.last_name);
    }
    tracing::info!(count = users.len(), "Listed volunteers");

    Ok(())
}
