//! User domain types.

use serde::{Deserialize, Serialize};

use opencall_core::{Email, PersonName};

/// A registered volunteer, as stored in the `users` table.
///
/// The whole row, password hash included, is what gets stored in the
/// session after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sanitized email address.
    pub email: String,
    /// bcrypt hash of the salted password.
    pub password_hash: String,
    /// Sanitized first name.
    pub first_name: String,
    /// Sanitized last name.
    pub last_name: String,
}

/// A validated registration, ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
}
