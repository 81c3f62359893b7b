//! OpenCall server library.
//!
//! Registration, password login, the session-gated phone-banking dashboard
//! and the admin view, exposed as a library so the binary, the CLI and the
//! integration tests share one router and one store layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
