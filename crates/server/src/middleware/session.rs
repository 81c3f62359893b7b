//! Session middleware configuration.
//!
//! Sessions live in process memory and are lost on restart. The cookie only
//! carries the session id, signed with a key derived from the configured
//! session secret.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "opencall_session";

/// Derive the 64-byte cookie signing key from an arbitrary-length secret.
fn signing_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

/// Create the session layer with an in-memory store.
///
/// The cookie is `HttpOnly`, `SameSite=Lax`, scoped to `/` and not marked
/// `Secure`, and expires with the browser session.
///
/// # Arguments
///
/// * `session_secret` - Secret used to sign the session cookie
#[must_use]
pub fn create_session_layer(
    session_secret: &SecretString,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(session_secret))
}
