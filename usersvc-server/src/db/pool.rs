//! PostgreSQL connection pool

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a pool with the default connection limit.
///
/// ```ignore
/// let database = DatabaseConfig::from_env()?;
/// let pool = create_pool(database.connect_options().clone()).await?;
/// ```
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(options, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool with a custom connection limit.
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    // Run with: DATABASE_URL=postgres://... cargo test -p usersvc-server -- --ignored

    pub(crate) fn test_options() -> PgConnectOptions {
        DatabaseConfig::from_env()
            .expect("DATABASE_URL or DB_* required")
            .connect_options()
            .clone()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_round_trip() {
        let pool = create_pool(test_options()).await.expect("pool creation failed");

        let (one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn zero_limit_still_connects() {
        let pool = create_pool_with_options(test_options(), 0)
            .await
            .expect("pool creation failed");
        assert_eq!(pool.options().get_max_connections(), 1);
    }
}
