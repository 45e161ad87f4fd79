//! # configs
//!
//! Typed runtime settings. Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml`, then `config/local.toml` (both optional)
//! 3. process environment, after [`load_dotenv`] has applied `.env`
//!
//! Keys are the lower-cased environment variable names (`PORT` → `port`).
//! Secrets are held in [`SecretString`] so `Debug` output stays redacted.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ADMIN_USERNAME: &str = "website-admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "website-admin";

/// Origins of the local frontend dev servers.
const DEV_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:8080",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug)]
pub struct Settings {
    pub environment: AppEnvironment,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub admin: AdminSettings,
    pub cors: CorsSettings,
    pub rate_limit: RateLimitSettings,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

#[derive(Debug)]
pub struct DatabaseSettings {
    /// `None` skips the durable bootstrap entirely.
    pub url: Option<SecretString>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    /// Hosted Postgres in production is reached over TLS.
    pub require_tls: bool,
}

#[derive(Debug)]
pub struct AdminSettings {
    pub username: String,
    pub password: SecretString,
    /// Argon2 PHC string; takes precedence over `password` when present.
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitSettings {
    pub max_requests: u32,
    pub window: Duration,
}

/// Flat shape the `config` crate deserializes into.
#[derive(Deserialize)]
struct RawSettings {
    app_env: AppEnvironment,
    listen_host: String,
    port: u16,
    body_limit_bytes: usize,
    database_url: Option<String>,
    database_max_connections: u32,
    database_connect_timeout_secs: u64,
    admin_username: String,
    admin_password: String,
    admin_password_hash: Option<String>,
    frontend_url: Option<String>,
    /// Comma-separated.
    cors_allowed_origins: Option<String>,
    rate_limit_max_requests: u32,
    rate_limit_window_secs: u64,
    log_format: LogFormat,
}

impl Settings {
    /// Layers files and the process environment. Call [`load_dotenv`]
    /// first so `.env` entries are part of that environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(environment_source())
    }

    /// Builds settings with a caller-supplied environment source; tests use
    /// this with an explicit map instead of mutating the process environment.
    pub fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let raw: RawSettings = Config::builder()
            .set_default("app_env", "development")?
            .set_default("listen_host", "0.0.0.0")?
            .set_default("port", 3001)?
            .set_default("body_limit_bytes", 10 * 1024 * 1024)?
            .set_default("database_max_connections", 5)?
            .set_default("database_connect_timeout_secs", 5)?
            .set_default("admin_username", DEFAULT_ADMIN_USERNAME)?
            .set_default("admin_password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("rate_limit_max_requests", 100)?
            .set_default("rate_limit_window_secs", 15 * 60)?
            .set_default("log_format", "text")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;

        raw.try_into()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Outcome of looking for a `.env` file. Loading happens before logging is
/// configured, so the outcome is kept and reported afterwards.
#[derive(Debug, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing,
    /// Only the error kind; parse errors would otherwise quote the line.
    Unreadable(String),
}

/// Loads `.env` into the process environment.
pub fn load_dotenv() -> DotenvStatus {
    dotenvy::dotenv().into()
}

impl From<Result<PathBuf, dotenvy::Error>> for DotenvStatus {
    fn from(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvStatus::Loaded(path),
            Err(e) if e.not_found() => DotenvStatus::Missing,
            Err(dotenvy::Error::LineParse(_, index)) => {
                DotenvStatus::Unreadable(format!("parse error at position {index}"))
            }
            Err(dotenvy::Error::Io(io)) => DotenvStatus::Unreadable(io.kind().to_string()),
            Err(_) => DotenvStatus::Unreadable("invalid environment variable".to_string()),
        }
    }
}

impl DotenvStatus {
    pub fn log(&self) {
        match self {
            DotenvStatus::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            DotenvStatus::Missing => tracing::debug!("no .env file found"),
            DotenvStatus::Unreadable(reason) => {
                tracing::warn!(%reason, "ignoring unreadable .env file")
            }
        }
    }
}

/// The process environment. Values stay strings until deserialized so a
/// numeric-looking password is never reinterpreted.
pub fn environment_source() -> Environment {
    Environment::default().ignore_empty(true)
}

impl TryFrom<RawSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, ConfigError> {
        if raw.admin_username.trim().is_empty() {
            return Err(invalid("admin_username", "must not be empty"));
        }
        if raw.rate_limit_max_requests == 0 {
            return Err(invalid("rate_limit_max_requests", "must be at least 1"));
        }
        if raw.rate_limit_window_secs == 0 {
            return Err(invalid("rate_limit_window_secs", "must be at least 1"));
        }
        if raw.body_limit_bytes == 0 {
            return Err(invalid("body_limit_bytes", "must be at least 1"));
        }

        let allowed_origins = allowed_origins(
            raw.app_env,
            raw.cors_allowed_origins,
            raw.frontend_url.as_deref(),
        );

        Ok(Settings {
            environment: raw.app_env,
            server: ServerSettings {
                host: raw.listen_host,
                port: raw.port,
                body_limit_bytes: raw.body_limit_bytes,
            },
            database: DatabaseSettings {
                url: raw
                    .database_url
                    .filter(|url| !url.trim().is_empty())
                    .map(SecretString::from),
                max_connections: raw.database_max_connections.max(1),
                connect_timeout: Duration::from_secs(raw.database_connect_timeout_secs),
                require_tls: raw.app_env == AppEnvironment::Production,
            },
            admin: AdminSettings {
                username: raw.admin_username,
                password: SecretString::from(raw.admin_password),
                password_hash: raw.admin_password_hash.filter(|h| !h.trim().is_empty()),
            },
            cors: CorsSettings { allowed_origins },
            rate_limit: RateLimitSettings {
                max_requests: raw.rate_limit_max_requests,
                window: Duration::from_secs(raw.rate_limit_window_secs),
            },
            log_format: raw.log_format,
        })
    }
}

fn invalid(key: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}

/// Explicit list if given, otherwise the dev servers outside production;
/// `FRONTEND_URL` is always appended.
fn allowed_origins(
    env: AppEnvironment,
    explicit: Option<String>,
    frontend_url: Option<&str>,
) -> Vec<String> {
    let mut origins = match explicit {
        Some(list) => list.split(',').map(str::to_string).collect(),
        None if env == AppEnvironment::Development => {
            DEV_ORIGINS.iter().map(|o| o.to_string()).collect()
        }
        None => Vec::new(),
    };
    origins.extend(frontend_url.map(str::to_string));

    let mut seen = Vec::with_capacity(origins.len());
    for origin in origins {
        let origin = origin.trim().trim_end_matches('/').to_string();
        if !origin.is_empty() && !seen.contains(&origin) {
            seen.push(origin);
        }
    }
    seen
}
