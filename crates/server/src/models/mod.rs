//! Domain models for OpenCall.

pub mod admin;
pub mod session;
pub mod user;

pub use admin::Admin;
pub use session::keys as session_keys;
pub use user::{NewUser, User};
