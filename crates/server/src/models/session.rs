//! Session-related types.
//!
//! Keys for values stored in the server-side session.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the logged-in [`User`](crate::models::User) row.
    pub const CURRENT_USER: &str = "user";
}
