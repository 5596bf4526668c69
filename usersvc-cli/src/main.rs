//! usersvc - User Management API server
//!
//! Entry point for the `usersvc` binary:
//! - `serve`: run migrations and serve the HTTP API
//! - `migrate`: create the database schema and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::{migrate::MigrateArgs, serve::ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "usersvc",
    author,
    version,
    about = "User Management API: create, fetch, and list users over HTTP"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create the database schema and exit
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
