//! Subcommand implementations

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use usersvc_server::DatabaseConfig;

/// `--database-url` (or `DATABASE_URL`) if given, else the `DB_*` variables.
pub fn resolve_database(url: Option<String>) -> Result<DatabaseConfig> {
    match url {
        Some(url) => DatabaseConfig::from_url(&url).context("Invalid database URL"),
        None => DatabaseConfig::from_env()
            .context("Database not configured. Set --database-url, DATABASE_URL, or DB_* in .env"),
    }
}
