//! Admin view and startup seeding tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use opencall_core::Permissions;
use opencall_integration_tests::{ADMIN_EMAIL, TestApp};
use opencall_server::db::{self, AdminRepository};

const PERMISSIONS_OPEN: &str = r#"<code class="permissions">"#;

/// Text of the permissions element with HTML entities for `&` decoded.
fn shown_permissions(body: &str) -> String {
    let start = body.find(PERMISSIONS_OPEN).unwrap() + PERMISSIONS_OPEN.len();
    let end = start + body[start..].find("</code>").unwrap();
    body[start..end].replace("&#38;", "&").replace("&amp;", "&")
}

#[tokio::test]
async fn test_seeded_admin_sees_permissions() {
    let mut app = TestApp::new().await;
    app.register(ADMIN_EMAIL, "p", "Ada", "Admin").await;
    assert!(app.login(ADMIN_EMAIL, "p").await.redirects_to("/pb"));

    let response = app.get("/admin").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(shown_permissions(&response.body), Permissions::DEFAULT);
    assert!(response.body.contains("<li>manageUsers</li>"));
    assert!(response.body.contains("<li>manageEvents</li>"));
}

#[tokio::test]
async fn test_store_returns_seeded_permissions_verbatim() {
    let app = TestApp::new().await;

    let admin = AdminRepository::new(app.pool())
        .get_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(admin.permissions.as_str(), "manageUsers&manageEvents");
}

#[tokio::test]
async fn test_prepare_is_idempotent() {
    let app = TestApp::new().await;

    db::prepare(app.pool(), ADMIN_EMAIL).await.unwrap();
    db::prepare(app.pool(), ADMIN_EMAIL).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins WHERE email = ?1")
        .bind(ADMIN_EMAIL)
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_non_admin_is_sent_to_dashboard() {
    let mut app = TestApp::new().await;
    app.register("vol@b.com", "p", "Val", "Unteer").await;
    app.login("vol@b.com", "p").await;

    assert!(app.get("/admin").await.redirects_to("/pb"));
}

#[tokio::test]
async fn test_admin_requires_login() {
    let mut app = TestApp::new().await;

    assert!(app.get("/admin").await.redirects_to("/login"));
}

#[tokio::test]
async fn test_custom_permissions_pass_through() {
    let mut app = TestApp::new().await;
    AdminRepository::new(app.pool())
        .grant_if_absent("lead@b.com", &Permissions::new("manageEvents"))
        .await
        .unwrap();
    app.register("lead@b.com", "p", "Lee", "Dar").await;
    app.login("lead@b.com", "p").await;

    let response = app.get("/admin").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(shown_permissions(&response.body), "manageEvents");
    assert!(!response.body.contains("manageUsers"));
}
