//! Database connection settings from the environment
//!
//! `DATABASE_URL` wins when set. Otherwise the connection is assembled
//! from `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT` and `DB_NAME`
//! as discrete connect options, so credentials are never spliced into a URL.

use std::env;

use sqlx::postgres::PgConnectOptions;

/// Default PostgreSQL host
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default PostgreSQL port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set (or set DATABASE_URL)")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Resolved database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    options: PgConnectOptions,
}

impl DatabaseConfig {
    /// Parse a `postgres://` connection URL.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let options = url
            .parse::<PgConnectOptions>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "DATABASE_URL",
                reason: e.to_string(),
            })?;
        Ok(Self { options })
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get("DATABASE_URL") {
            return Self::from_url(&url);
        }

        let user = get("DB_USER").ok_or(ConfigError::MissingVar("DB_USER"))?;
        let name = get("DB_NAME").ok_or(ConfigError::MissingVar("DB_NAME"))?;
        let host = get("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string());
        let port = match get("DB_PORT") {
            Some(p) => p.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                var: "DB_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_DB_PORT,
        };

        let mut options = PgConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&user)
            .database(&name);
        if let Some(password) = get("DB_PASSWORD") {
            options = options.password(&password);
        }

        Ok(Self { options })
    }

    pub fn connect_options(&self) -> &PgConnectOptions {
        &self.options
    }

    /// Connection target without credentials, safe for logs.
    pub fn redacted(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.options.get_username(),
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or_default(),
        )
    }
}
