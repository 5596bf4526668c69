//! Schema creation command

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db::{create_pool, migrations};

use super::resolve_database;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides DB_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the `users` table and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database = resolve_database(args.database_url)?;
    tracing::info!(database = %database.redacted(), "Connecting to database");

    let pool = create_pool(database.connect_options().clone())
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
