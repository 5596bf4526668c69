//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db::{create_pool_with_options, migrations, pool::DEFAULT_MAX_CONNECTIONS};
use usersvc_server::http::server::DEFAULT_ALLOWED_ORIGINS;
use usersvc_server::{run_server, AppState, MemoryUserStore, PgUserStore, ServerConfig};

use super::resolve_database;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "USERSVC_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL (overrides DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Origin allowed for CORS (repeatable; replaces the defaults)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allow_origins: Vec<String>,

    /// Keep users in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        let allowed_origins = if self.allow_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
        } else {
            self.allow_origins.clone()
        };

        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            allowed_origins,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        AppState::new(MemoryUserStore::new())
    } else {
        let database = resolve_database(args.database_url)?;
        tracing::info!(database = %database.redacted(), "Connecting to database");

        let pool =
            create_pool_with_options(database.connect_options().clone(), args.max_connections)
                .await
                .context("Failed to create database pool")?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        AppState::new(PgUserStore::new(pool))
    };

    tracing::info!("Starting usersvc on {}", config.bind_addr);

    run_server(state, config).await.context("Server error")?;

    Ok(())
}
