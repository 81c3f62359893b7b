//! Admin permission string.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The raw permission string stored for an admin, e.g. `manageUsers&manageEvents`.
///
/// The stored value is kept exactly as written. [`Permissions::capabilities`]
/// splits it for display; nothing in the request path interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Permissions(String);

impl Permissions {
    /// Permission string given to the admin seeded at startup.
    pub const DEFAULT: &'static str = "manageUsers&manageEvents";

    /// Separator between capability names.
    pub const SEPARATOR: char = '&';

    /// Wrap a raw permission string without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw permission string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty capability names in the order they were written.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATOR).filter(|c| !c.is_empty())
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_permissions() {
        assert_eq!(Permissions::default().as_str(), "manageUsers&manageEvents");
    }

    #[test]
    fn test_capabilities() {
        let perms = Permissions::default();
        let caps: Vec<_> = perms.capabilities().collect();
        assert_eq!(caps, ["manageUsers", "manageEvents"]);
    }

    #[test]
    fn test_capabilities_skip_empty_segments() {
        let perms = Permissions::new("&manageUsers&&");
        assert_eq!(perms.capabilities().collect::<Vec<_>>(), ["manageUsers"]);
        assert_eq!(perms.as_str(), "&manageUsers&&");
    }
}
