//! Email address type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Loose `local@domain.tld` shape: one `@`, and at least one `.` after it.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Constant pattern
    Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap()
});

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing was left after sanitization.
    #[error("email cannot be empty")]
    Empty,
    /// The sanitized input is not shaped like `local@domain.tld`.
    #[error("email must look like local@domain.tld")]
    InvalidShape,
}

/// A sanitized email address.
///
/// Input is filtered down to `[a-zA-Z0-9@.]` before anything else happens,
/// so `"bad email!"` becomes `"bademail"` rather than being rejected for its
/// characters. Case is preserved and there is no length limit.
///
/// ## Constraints
///
/// - Only ASCII letters, digits, `@` and `.`
/// - Matches `^[^@]+@[^@]+\.[^@]+$`
///
/// ## Examples
///
/// ```
/// use opencall_core::Email;
///
/// assert_eq!(Email::sanitize("a b@c.com"), "ab@c.com");
///
/// assert!(Email::parse("a@b.com").is_ok());
/// assert!(Email::parse("bad email!").is_err()); // sanitized to "bademail"
/// assert!(Email::parse("user@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Remove every character outside `[a-zA-Z0-9@.]`.
    ///
    /// Applying this twice yields the same result as applying it once.
    #[must_use]
    pub fn sanitize(raw: &str) -> String {
        raw.chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '@' || *c == '.')
            .collect()
    }

    /// Sanitize `raw` and check its shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the sanitized input:
    /// - Is empty
    /// - Does not match `local@domain.tld`
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let sanitized = Self::sanitize(raw);

        if sanitized.is_empty() {
            return Err(EmailError::Empty);
        }

        if !EMAIL_SHAPE.is_match(&sanitized) {
            return Err(EmailError::InvalidShape);
        }

        Ok(Self(sanitized))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_sanitize_strips_disallowed_characters() {
        assert_eq!(Email::sanitize("bad email!"), "bademail");
        assert_eq!(Email::sanitize("user+tag@example.com"), "usertag@example.com");
        assert_eq!(Email::sanitize("j\u{f6}rg@b\u{fc}cher.de"), "jrg@bcher.de");
        assert_eq!(Email::sanitize("<script>@x.io"), "script@x.io");
    }

    #[test]
    fn test_sanitize_preserves_case() {
        assert_eq!(Email::sanitize("Alice@Example.COM"), "Alice@Example.COM");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "bad email!",
            "a@b.com",
            "   ",
            "\u{1f600}x@y.z",
            "a-b_c@d-e.f",
            "..@@..",
        ];
        for input in inputs {
            let once = Email::sanitize(input);
            assert_eq!(Email::sanitize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("a@b.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user@subdomain.example.co.uk").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_parse_sanitizes_before_validating() {
        let email = Email::parse(" first.last+spam@example.org ").unwrap();
        assert_eq!(email.as_str(), "first.lastspam@example.org");
    }

    #[test]
    fn test_parse_empty_after_sanitizing() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("!!! ???"), Err(EmailError::Empty));
    }

    #[test]
    fn test_parse_bad_shape() {
        assert_eq!(Email::parse("bad email!"), Err(EmailError::InvalidShape));
        assert_eq!(Email::parse("user@localhost"), Err(EmailError::InvalidShape));
        assert_eq!(Email::parse("@b.com"), Err(EmailError::InvalidShape));
        assert_eq!(Email::parse("a@@b.com"), Err(EmailError::InvalidShape));
        assert_eq!(Email::parse("a@b."), Err(EmailError::InvalidShape));
    }

    #[test]
    fn test_parse_is_permissive_about_dots() {
        // Only a single "[^@]+\.[^@]+" segment is required after the @.
        assert!(Email::parse("a@.b.c").is_ok());
        assert!(Email::parse("a@b..c").is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("user@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"user@example.com\"");
    }

    proptest! {
        #[test]
        fn prop_sanitize_keeps_only_allowed_characters(raw in any::<String>()) {
            let sanitized = Email::sanitize(&raw);
            prop_assert!(
                sanitized
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '@' || c == '.')
            );
            prop_assert_eq!(Email::sanitize(&sanitized), sanitized);
        }

        #[test]
        fn prop_parse_stores_the_sanitized_input(raw in any::<String>()) {
            if let Ok(email) = Email::parse(&raw) {
                prop_assert_eq!(email.as_str(), Email::sanitize(&raw));
                prop_assert_eq!(email.as_str().matches('@').count(), 1);
            }
        }
    }
}
