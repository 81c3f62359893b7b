//! Phone-banking dashboard.
//!
//! Everything under `/pb` is gated on a logged-in session; there is no role
//! check beyond that.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::RequireAuth;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "pb.html")]
pub struct DashboardTemplate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Display the dashboard for any method and any path below `/pb`.
pub async fn dashboard(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    DashboardTemplate {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
    }
}
