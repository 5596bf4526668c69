//! Schema creation, run once at startup

use sqlx::PgPool;

use super::DbError;

/// Create the `users` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running user migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            bio TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("User migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::db::pool::tests::test_options;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let pool = create_pool(test_options()).await.expect("pool creation failed");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");

        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'users')",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");
        assert!(exists);
    }
}
