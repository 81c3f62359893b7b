//! HTTP route handlers for OpenCall.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page
//! GET  /health           - Liveness check
//! GET  /health/ready     - Readiness check (database)
//!
//! # Auth
//! GET  /login            - Login page (redirects to /pb when logged in)
//! POST /login            - Login action
//! GET  /register         - Register page (redirects to /pb when logged in)
//! POST /register         - Register action
//! GET  /logout           - Destroy session
//!
//! # Volunteers (requires login)
//! ANY  /pb, /pb/*        - Phone-banking dashboard
//! GET  /admin            - Admin view (admins only)
//!
//! # Everything else
//! GET  /*                - Static files from the public directory
//! ```

pub mod admin;
pub mod auth;
pub mod health;
pub mod home;
pub mod pb;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{any, get},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .route("/pb", any(pb::dashboard))
        .route("/pb/", any(pb::dashboard))
        .route("/pb/{*rest}", any(pb::dashboard))
        .route("/admin", get(admin::index))
}

/// Build the complete application: pages, health checks, static files,
/// sessions, request ids and request tracing.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(&state.config().session_secret);
    let public_dir = ServeDir::new(&state.config().public_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .fallback_service(public_dir)
        .layer(session_layer)
        .with_state(state)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
}
