//! usersvc-server: HTTP API over a single `users` table
//!
//! Create, fetch-by-id, and paginated listing of users, backed by
//! PostgreSQL (or an in-memory store for tests and demos).

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{CreateOutcome, DbError, MemoryUserStore, PgUserStore, UserStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
