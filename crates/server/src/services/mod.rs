//! Business logic services for OpenCall.
//!
//! # Services
//!
//! - `auth` - Registration and password login (sanitization, bcrypt)

pub mod auth;
