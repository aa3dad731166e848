//! Server configuration, loaded from the environment at startup.

use focal_auth::config::AuthConfig;
use focal_core::error::{FocalError, FocalResult};
use focal_db::DbConfig;

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (default: `0.0.0.0:3000`).
    pub bind_addr: String,
    /// Apex domain the SaaS is served from; tenant subdomains hang off
    /// it (default: `localhost` for development).
    pub base_domain: String,
    pub auth: AuthConfig,
    pub db: DbConfig,
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Read configuration from `FOCAL_*` environment variables.
    ///
    /// `FOCAL_SESSION_SECRET` is mandatory — without it sessions would
    /// be forgeable, so startup fails instead of falling back.
    pub fn from_env() -> FocalResult<Self> {
        let session_secret = env("FOCAL_SESSION_SECRET").ok_or_else(|| {
            FocalError::Configuration("FOCAL_SESSION_SECRET is not set".into())
        })?;
        let cookie_secure = env("FOCAL_COOKIE_SECURE")
            .map(|v| !matches!(v.as_str(), "0" | "false"))
            .unwrap_or(true);

        let defaults = DbConfig::default();
        let db = DbConfig {
            url: env("FOCAL_DB_URL").unwrap_or(defaults.url),
            namespace: env("FOCAL_DB_NAMESPACE").unwrap_or(defaults.namespace),
            database: env("FOCAL_DB_DATABASE").unwrap_or(defaults.database),
            username: env("FOCAL_DB_USERNAME").unwrap_or(defaults.username),
            password: env("FOCAL_DB_PASSWORD").unwrap_or(defaults.password),
        };

        Ok(Self {
            bind_addr: env("FOCAL_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into()),
            base_domain: env("FOCAL_BASE_DOMAIN").unwrap_or_else(|| "localhost".into()),
            auth: AuthConfig::new(session_secret, cookie_secure)?,
            db,
        })
    }
}
