//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty after sanitization.
    #[error("missing required fields")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] opencall_core::EmailError),

    /// No user is registered under the email.
    #[error("email not found")]
    EmailNotFound,

    /// The password does not match the stored hash.
    #[error("incorrect password")]
    IncorrectPassword,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

impl AuthError {
    /// Message shown inline on the login or registration form.
    ///
    /// Returns `None` for failures that are not the user's to fix.
    #[must_use]
    pub const fn form_message(&self) -> Option<&'static str> {
        match self {
            Self::MissingFields => Some("Please fill out all fields."),
            Self::InvalidEmail(_) => Some("Please enter a valid email."),
            Self::UserAlreadyExists => Some("Email already in use."),
            Self::EmailNotFound => Some("Email not found"),
            Self::IncorrectPassword => Some("Incorrect password."),
            Self::Repository(_) | Self::PasswordHash(_) => None,
        }
    }
}
