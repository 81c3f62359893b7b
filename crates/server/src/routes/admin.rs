//! Admin view.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use opencall_core::Permissions;

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Admin page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub email: String,
    /// Stored permission string, unmodified.
    pub permissions: Permissions,
}

impl AdminTemplate {
    /// Individual capabilities for display.
    pub fn capabilities(&self) -> Vec<&str> {
        self.permissions.capabilities().collect()
    }
}

/// Show the admin view to users listed in `admins`; everyone else goes to `/pb`.
#[tracing::instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let admin = AdminRepository::new(state.pool())
        .get_by_email(&user.email)
        .await?;

    let Some(admin) = admin else {
        tracing::debug!(email = %user.email, "Not an admin, redirecting to dashboard");
        return Ok(Redirect::to("/pb").into_response());
    };

    Ok(AdminTemplate {
        email: admin.email,
        permissions: admin.permissions,
    }
    .into_response())
}
