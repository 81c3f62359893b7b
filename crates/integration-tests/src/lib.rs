//! Integration test harness for OpenCall.
//!
//! [`TestApp`] builds the real application router over an in-memory SQLite
//! database and drives it with `tower::ServiceExt::oneshot`, carrying the
//! session cookie between requests the way a browser would.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut app = TestApp::new().await;
//! app.register("a@b.com", "p", "A", "B").await;
//! let response = app.login("a@b.com", "p").await;
//! assert_eq!(response.location(), Some("/pb"));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use opencall_server::config::{ConfigFile, OpencallConfig};
use opencall_server::db;
use opencall_server::middleware::SESSION_COOKIE_NAME;
use opencall_server::routes;
use opencall_server::services::auth::CredentialCodec;
use opencall_server::state::AppState;

/// Admin email seeded into every test database.
pub const ADMIN_EMAIL: &str = "admin@opencall.test";

/// Salt appended to passwords in tests.
pub const TEST_SALT: &str = "test-salt";

/// Lowest bcrypt cost, to keep tests fast.
const TEST_HASH_COST: u32 = 4;

/// A response with its body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Whether the response is a redirect to `target`.
    #[must_use]
    pub fn redirects_to(&self, target: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(target)
    }
}

/// The application under test plus a one-cookie jar.
pub struct TestApp {
    router: Router,
    pool: SqlitePool,
    cookie: Option<String>,
}

impl TestApp {
    /// Build an app whose seeded admin is [`ADMIN_EMAIL`].
    pub async fn new() -> Self {
        Self::with_admin(ADMIN_EMAIL).await
    }

    /// Build an app seeding `admin_email` at startup.
    pub async fn with_admin(admin_email: &str) -> Self {
        let pool = memory_pool().await;
        db::prepare(&pool, admin_email)
            .await
            .expect("Failed to prepare test database");

        let config = test_config(admin_email);
        let codec = CredentialCodec::with_cost(SecretString::from(TEST_SALT), TEST_HASH_COST);
        let state = AppState::with_codec(config, pool.clone(), codec);

        Self {
            router: routes::app(state),
            pool,
            cookie: None,
        }
    }

    /// Database behind the app.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A second browser against the same app and database, with no cookie.
    #[must_use]
    pub fn new_client(&self) -> Self {
        Self {
            router: self.router.clone(),
            pool: self.pool.clone(),
            cookie: None,
        }
    }

    /// Whether the jar currently holds a session cookie.
    #[must_use]
    pub const fn has_session_cookie(&self) -> bool {
        self.cookie.is_some()
    }

    /// GET `uri`.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    /// Send a body-less request with any method.
    pub async fn request(&mut self, method: Method, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// POST an urlencoded form.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// POST a JSON body.
    pub async fn post_json(&mut self, uri: &str, value: &serde_json::Value) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Submit the registration form.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> TestResponse {
        self.post_form(
            "/register",
            &[
                ("email", email),
                ("password", password),
                ("fname", first_name),
                ("lname", last_name),
            ],
        )
        .await
    }

    /// Submit the login form.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    /// Send `request` with the stored cookie and keep any new session cookie.
    pub async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            let value = cookie.parse().expect("Invalid cookie header");
            request.headers_mut().insert(header::COOKIE, value);
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router error");

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().expect("Non-ASCII Set-Cookie");
            self.store_cookie(set_cookie);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let location = headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };
        if name != SESSION_COOKIE_NAME {
            return;
        }

        let removed = value.is_empty()
            || set_cookie
                .split(';')
                .any(|attr| attr.trim().eq_ignore_ascii_case("Max-Age=0"));

        self.cookie = if removed { None } else { Some(pair.to_owned()) };
    }
}

/// Count rows in `users` for an exact email.
pub async fn user_count(pool: &SqlitePool, email: &str) -> i64 {
    db::UserRepository::new(pool)
        .count_by_email(email)
        .await
        .expect("Failed to count users")
}

async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

fn test_config(admin_email: &str) -> OpencallConfig {
    let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../public");
    let public_dir = public_dir.to_string_lossy().into_owned();
    let admin_email = admin_email.to_owned();

    OpencallConfig::resolve(ConfigFile::default(), move |key: &str| match key {
        "OPENCALL_SESSION_SECRET" => Some("integration-test-session-secret-0123456789".to_owned()),
        "OPENCALL_SALT" => Some(TEST_SALT.to_owned()),
        "OPENCALL_ADMIN_EMAIL" => Some(admin_email.clone()),
        "OPENCALL_DATABASE_URL" => Some("sqlite::memory:".to_owned()),
        "OPENCALL_PUBLIC_DIR" => Some(public_dir.clone()),
        _ => None,
    })
    .expect("Invalid test configuration")
}
