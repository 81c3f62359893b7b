//! Server configuration loaded from `config.json` and environment variables.
//!
//! Values from the legacy `config.json` file (`sessionSecret`, `salt`, `port`,
//! `adminEmail`) are read first when the file exists; environment variables
//! (and a `.env` file) override them.
//!
//! # Environment Variables
//!
//! ## Required (unless present in `config.json`)
//! - `OPENCALL_SESSION_SECRET` - Session cookie signing secret
//! - `OPENCALL_SALT` - Shared string appended to every password before hashing (may be empty)
//! - `OPENCALL_ADMIN_EMAIL` - Email of the admin seeded at startup
//!
//! ## Optional
//! - `OPENCALL_CONFIG` - Path to the JSON config file (default: config.json)
//! - `OPENCALL_HOST` - Bind address (default: 127.0.0.1)
//! - `OPENCALL_PORT` - Listen port (default: 3000)
//! - `OPENCALL_DATABASE_URL` - SQLite connection string (default: `sqlite://database.db`)
//! - `OPENCALL_PUBLIC_DIR` - Directory served for static files (default: public)
//! - `OPENCALL_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use opencall_core::Email;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Session secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SESSION_SECRET_LENGTH: usize = 32;

const CONFIG_PATH_VAR: &str = "OPENCALL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://database.db";
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(String),
    #[error("Invalid configuration {0}: {1}")]
    Invalid(String, String),
    #[error("Failed to read config file {path}: {message}")]
    File { path: PathBuf, message: String },
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct OpencallConfig {
    /// SQLite connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Shared password salt
    pub salt: SecretString,
    /// Email of the admin seeded at startup
    pub admin_email: String,
    /// Directory of static files
    pub public_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Shape of the legacy `config.json` file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub session_secret: Option<String>,
    pub salt: Option<String>,
    pub port: Option<u16>,
    pub admin_email: Option<String>,
}

impl ConfigFile {
    /// Read the config file at `path`; a missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::File` if the file exists but cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let file_error = |message: String| ConfigError::File {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        Self::from_json(&content).map_err(|e| file_error(e.to_string()))
    }

    /// Parse settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a valid config object.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

impl OpencallConfig {
    /// Load configuration from `config.json` and the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required setting is missing (most notably
    /// the admin email), a value cannot be parsed, or the config file is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        let file = ConfigFile::read(Path::new(&path))?;

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Combine file settings with variables returned by `lookup`.
    ///
    /// Variables from `lookup` win over file settings.
    ///
    /// # Errors
    ///
    /// See [`OpencallConfig::load`].
    pub fn resolve(
        file: ConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = parse_var::<IpAddr>(&lookup, "OPENCALL_HOST")?
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let port = match parse_var::<u16>(&lookup, "OPENCALL_PORT")? {
            Some(port) => port,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let session_secret = lookup("OPENCALL_SESSION_SECRET")
            .or(file.session_secret)
            .ok_or_else(|| missing("OPENCALL_SESSION_SECRET", "sessionSecret"))?;
        if session_secret.is_empty() {
            return Err(missing("OPENCALL_SESSION_SECRET", "sessionSecret"));
        }

        let salt = lookup("OPENCALL_SALT")
            .or(file.salt)
            .ok_or_else(|| missing("OPENCALL_SALT", "salt"))?;

        let admin_email = lookup("OPENCALL_ADMIN_EMAIL")
            .or(file.admin_email)
            .map(|email| email.trim().to_owned())
            .filter(|email| !email.is_empty())
            .ok_or_else(|| missing("OPENCALL_ADMIN_EMAIL", "adminEmail"))?;

        let database_url =
            lookup("OPENCALL_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let public_dir =
            lookup("OPENCALL_PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_owned());
        let log_format = parse_var::<LogFormat>(&lookup, "OPENCALL_LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            session_secret: SecretString::from(session_secret),
            salt: SecretString::from(salt),
            admin_email,
            public_dir: PathBuf::from(public_dir),
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the session secret is shorter than recommended.
    #[must_use]
    pub fn has_weak_session_secret(&self) -> bool {
        self.session_secret.expose_secret().len() < RECOMMENDED_SESSION_SECRET_LENGTH
    }

    /// Whether the admin email contains characters that login strips.
    ///
    /// The admin row is seeded with the configured value as written, so such
    /// an account can never be reached through the login form.
    #[must_use]
    pub fn has_unsanitized_admin_email(&self) -> bool {
        Email::sanitize(&self.admin_email) != self.admin_email
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn missing(var: &str, file_key: &str) -> ConfigError {
    ConfigError::Missing(format!("{var} (or \"{file_key}\" in config.json)"))
}

/// Parse an optional variable, reporting the variable name on failure.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::Invalid(key.to_owned(), e.to_string()))
        })
        .transpose()
}
