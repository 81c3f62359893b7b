//! Authentication route handlers.
//!
//! Handles registration, password login and logout. Validation failures are
//! rendered inline on the originating form with HTTP 200.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::extract::FormOrJson;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::services::auth::{AuthError, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
///
/// The HTML form posts `fname`/`lname`; JSON clients may use
/// `firstName`/`lastName` or `first_name`/`last_name`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    #[serde(rename = "fname", alias = "firstName", alias = "first_name")]
    pub first_name: String,
    #[serde(rename = "lname", alias = "lastName", alias = "last_name")]
    pub last_name: String,
}

impl RegisterForm {
    fn as_registration(&self) -> Registration<'_> {
        Registration {
            email: self.email.as_str(),
            password: self.password.as_str(),
            first_name: self.first_name.as_str(),
            last_name: self.last_name.as_str(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

/// Split an auth failure into an inline form message or a server error.
fn form_error(err: AuthError) -> Result<&'static str, AppError> {
    err.form_message().ok_or(AppError::Auth(err))
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page, or go straight to the dashboard when logged in.
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/pb").into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Handle login form submission.
///
/// On success the full user row is stored in the session.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    FormOrJson(form): FormOrJson<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth().login(&form.email, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &user).await?;
            set_sentry_user(&user.email);
            tracing::info!(email = %user.email, "Login succeeded");
            Ok(Redirect::to("/pb").into_response())
        }
        Err(err) => {
            let message = form_error(err)?;
            tracing::warn!(reason = message, "Login rejected");
            add_breadcrumb("auth", "Login rejected", Some(&[("reason", message)][..]));
            Ok(LoginTemplate {
                error: Some(message),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page, or go straight to the dashboard when logged in.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/pb").into_response();
    }

    RegisterTemplate { error: None }.into_response()
}

/// Handle registration form submission.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<RegisterForm>,
) -> Result<Response, AppError> {
    match state.auth().register(form.as_registration()).await {
        Ok(user) => {
            tracing::info!(email = %user.email, "Registered new volunteer");
            Ok(Redirect::to("/login").into_response())
        }
        Err(err) => {
            let message = form_error(err)?;
            tracing::warn!(reason = message, "Registration rejected");
            add_breadcrumb("auth", "Registration rejected", Some(&[("reason", message)][..]));
            Ok(RegisterTemplate {
                error: Some(message),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Destroy the session and return to the home page.
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/"))
}
