//! Authentication service.
//!
//! Password registration and login against the `users` table.

mod error;
mod password;

pub use error::AuthError;
pub use password::{CredentialCodec, HASH_COST};

use secrecy::ExposeSecret;
use sqlx::SqlitePool;

use opencall_core::{Email, PersonName};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};

/// Raw registration input, before sanitization.
#[derive(Debug, Clone, Copy)]
pub struct Registration<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Authentication service.
///
/// Handles user registration and password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    codec: &'a CredentialCodec,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, codec: &'a CredentialCodec) -> Self {
        Self {
            users: UserRepository::new(pool),
            codec,
        }
    }

    /// Register a new user.
    ///
    /// Email and names are sanitized first, then checked in order: all
    /// fields present, email shape, email not yet registered.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty after sanitization.
    /// Returns `AuthError::InvalidEmail` if the email is not shaped like `local@domain.tld`.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, registration: Registration<'_>) -> Result<User, AuthError> {
        let email = Email::sanitize(registration.email);
        let first_name = PersonName::parse(registration.first_name);
        let last_name = PersonName::parse(registration.last_name);
        let salted = self.codec.salted(registration.password);

        // The salted password is only empty when both password and salt are.
        let (Ok(first_name), Ok(last_name)) = (first_name, last_name) else {
            return Err(AuthError::MissingFields);
        };
        if salted.expose_secret().is_empty() || email.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(&email)?;

        if self.users.get_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self.codec.hash(salted).await?;

        let user = self
            .users
            .create_if_absent(&NewUser {
                email,
                password_hash,
                first_name,
                last_name,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailNotFound` if no user has the sanitized email.
    /// Returns `AuthError::IncorrectPassword` if the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::sanitize(email);
        let salted = self.codec.salted(password);

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        if self.codec.verify(salted, &user.password_hash).await? {
            Ok(user)
        } else {
            Err(AuthError::IncorrectPassword)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
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

    fn codec(salt: &str) -> CredentialCodec {
        CredentialCodec::with_cost(SecretString::from(salt.to_owned()), 4)
    }

    const fn registration<'a>(email: &'a str, password: &'a str) -> Registration<'a> {
        Registration {
            email,
            password,
            first_name: "A",
            last_name: "B",
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        let user = auth.register(registration("a@b.com", "p")).await.unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.first_name, "A");
        assert_eq!(user.last_name, "B");
        assert_ne!(user.password_hash, "p");

        let logged_in = auth.login("a@b.com", "p").await.unwrap();
        assert_eq!(logged_in, user);
    }

    #[tokio::test]
    async fn test_register_sanitizes_fields() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        let user = auth
            .register(Registration {
                email: " first+last@example.com ",
                password: "p",
                first_name: "Mary-Jane",
                last_name: "O'Neil",
            })
            .await
            .unwrap();

        assert_eq!(user.email, "firstlast@example.com");
        assert_eq!(user.first_name, "MaryJane");
        assert_eq!(user.last_name, "ONeil");
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        let cases = [
            Registration {
                first_name: "",
                ..registration("a@b.com", "p")
            },
            Registration {
                last_name: "!!",
                ..registration("a@b.com", "p")
            },
            registration("\u{2603}", "p"),
        ];

        for case in cases {
            let err = auth.register(case).await.unwrap_err();
            assert!(matches!(err, AuthError::MissingFields), "{case:?}");
        }
    }

    #[tokio::test]
    async fn test_empty_password_passes_when_salt_is_set() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        assert!(auth.register(registration("a@b.com", "")).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_password_with_empty_salt() {
        let pool = memory_pool().await;
        let codec = codec("");
        let auth = AuthService::new(&pool, &codec);

        let err = auth.register(registration("a@b.com", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingFields));
    }

    #[tokio::test]
    async fn test_register_bad_email_inserts_nothing() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        let err = auth.register(registration("bad email!", "p")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));

        let users = UserRepository::new(&pool);
        assert_eq!(users.count_by_email("bademail").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_after_sanitizing() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        auth.register(registration("a@b.com", "p")).await.unwrap();
        let err = auth.register(registration("a @b.com!", "q")).await.unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        let users = UserRepository::new(&pool);
        assert_eq!(users.count_by_email("a@b.com").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        let err = auth.login("nobody@b.com", "p").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailNotFound));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        auth.register(registration("a@b.com", "p")).await.unwrap();
        let err = auth.login("a@b.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::IncorrectPassword));
    }

    #[tokio::test]
    async fn test_login_sanitizes_email() {
        let pool = memory_pool().await;
        let codec = codec("pepper");
        let auth = AuthService::new(&pool, &codec);

        auth.register(registration("a@b.com", "p")).await.unwrap();
        assert!(auth.login(" a@b.com\t", "p").await.is_ok());
    }
}
