//! Home page, health checks, static files and request ids.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use opencall_integration_tests::TestApp;
use opencall_server::middleware::REQUEST_ID_HEADER;

#[tokio::test]
async fn test_home_page() {
    let mut app = TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("OpenCall"));
    assert!(response.body.contains(r#"href="/register""#));
}

#[tokio::test]
async fn test_home_page_when_logged_in_links_dashboard() {
    let mut app = TestApp::new().await;
    app.register("a@b.com", "p", "A", "B").await;
    app.login("a@b.com", "p").await;

    let response = app.get("/").await;

    assert!(response.body.contains(r#"href="/logout""#));
}

#[tokio::test]
async fn test_health_endpoints() {
    let mut app = TestApp::new().await;

    let live = app.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, "ok");

    assert_eq!(app.get("/health/ready").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_file_fallback() {
    let mut app = TestApp::new().await;

    let response = app.get("/css/style.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("--accent"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut app = TestApp::new().await;

    assert_eq!(app.get("/no/such/file.txt").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new().await;
    let mut client = app.new_client();

    let request = axum::http::Request::get("/health")
        .header(REQUEST_ID_HEADER, "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = client.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers.get(REQUEST_ID_HEADER).unwrap(), "req-42");
}
