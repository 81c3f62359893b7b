//! Person name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Nothing was left after sanitization.
    #[error("name cannot be empty")]
    Empty,
}

/// A first or last name reduced to ASCII letters and digits.
///
/// Spaces, hyphens, apostrophes and accented letters are all dropped, so
/// `"O'Brien"` is stored as `"OBrien"` and `"Zoë"` as `"Zo"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Remove every character outside `[a-zA-Z0-9]`.
    #[must_use]
    pub fn sanitize(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_alphanumeric).collect()
    }

    /// Sanitize `raw` and require something to be left over.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::Empty`] if sanitization removes every character.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let sanitized = Self::sanitize(raw);
        if sanitized.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(sanitized))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
