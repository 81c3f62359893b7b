//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::OpencallConfig;
use crate::services::auth::{AuthService, CredentialCodec};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: OpencallConfig,
    pool: SqlitePool,
    codec: CredentialCodec,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - OpenCall configuration
    /// * `pool` - SQLite connection pool
    #[must_use]
    pub fn new(config: OpencallConfig, pool: SqlitePool) -> Self {
        let codec = CredentialCodec::new(config.salt.clone());
        Self::with_codec(config, pool, codec)
    }

    /// Create application state with an explicit password codec.
    ///
    /// Tests use this to lower the bcrypt cost.
    #[must_use]
    pub fn with_codec(config: OpencallConfig, pool: SqlitePool, codec: CredentialCodec) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                codec,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &OpencallConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the password codec.
    #[must_use]
    pub fn codec(&self) -> &CredentialCodec {
        &self.inner.codec
    }

    /// Authentication service bound to this state's pool and codec.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.pool(), self.codec())
    }
}
