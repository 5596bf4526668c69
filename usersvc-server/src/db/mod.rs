//! Database layer - connection pool, schema, and user stores
//!
//! - Pooled connections; each operation holds one only for its own duration
//! - Duplicate emails are caught by lookup before insert
//! - `MemoryUserStore` mirrors `PgUserStore` for tests and demos

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
