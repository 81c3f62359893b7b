//! Core types for OpenCall.
//!
//! This module provides type-safe wrappers for the values users submit
//! through the registration and login forms.

pub mod email;
pub mod name;
pub mod permissions;

pub use email::{Email, EmailError};
pub use name::{NameError, PersonName};
pub use permissions::Permissions;
