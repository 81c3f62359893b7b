//! OpenCall Core - Shared types library.
//!
//! This crate provides the domain types used by the OpenCall components:
//! - `server` - The phone-banking web application
//! - `cli` - Command-line tools for schema setup and admin management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Input sanitization lives here so the server and the CLI filter user input
//! the same way.
//!
//! # Modules
//!
//! - [`types`] - Sanitizing wrappers for emails, person names and admin permissions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
