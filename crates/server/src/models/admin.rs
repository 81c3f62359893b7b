//! Admin domain types.

use opencall_core::Permissions;

/// An entry in the admin allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    /// Email the admin logs in with.
    pub email: String,
    /// Raw `&`-joined permission string.
    pub permissions: Permissions,
}
