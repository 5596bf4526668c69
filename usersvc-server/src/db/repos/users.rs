//! PostgreSQL user store

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::{CreateOutcome, DbError, UserStore};
use crate::models::{ListParams, NewUser, User};

/// User store backed by a connection pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn select_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, DbError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, bio
        FROM users
        WHERE email = $1
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(conn)
    .await?;

    Ok(user)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.pool.acquire().await?;
        select_by_email(&mut conn, email).await
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, bio
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<CreateOutcome, DbError> {
        // One connection for lookup + insert; returned to the pool on drop
        let mut conn = self.pool.acquire().await?;

        if select_by_email(&mut conn, new_user.email.as_str())
            .await?
            .is_some()
        {
            tracing::debug!(email = %new_user.email, "email already registered");
            return Ok(CreateOutcome::Duplicate);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, bio)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, bio
            "#,
        )
        .bind(&new_user.name)
        .bind(new_user.email.as_str())
        .bind(new_user.bio.as_deref())
        .fetch_one(&mut *conn)
        .await?;

        Ok(CreateOutcome::Created(user))
    }

    async fn list_users(&self, params: ListParams) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, bio
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::tests::test_options;
    use crate::db::{create_pool, migrations};
    use crate::models::Email;

    // Run with: DATABASE_URL=postgres://... cargo test -p usersvc-server -- --ignored
    // Each test uses its own email domain so runs don't collide.

    async fn store() -> PgUserStore {
        let pool = create_pool(test_options()).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        PgUserStore::new(pool)
    }

    fn unique_email(tag: &str) -> Email {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        Email::new(&format!("{tag}-{nanos}@pg-test.example.com")).unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_find() {
        let store = store().await;
        let email = unique_email("find");
        let new_user = NewUser::new("Ivan", email.clone(), Some("bio".into()));

        let user = store
            .create_user(&new_user)
            .await
            .unwrap()
            .created()
            .expect("should be created");
        assert!(user.id > 0);
        assert_eq!(user.email, email.as_str());

        let by_id = store.find_user_by_id(user.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&user));

        let by_email = store.find_user_by_email(email.as_str()).await.unwrap();
        assert_eq!(by_email, Some(user));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_not_inserted() {
        let store = store().await;
        let new_user = NewUser::new("Petr", unique_email("dup"), None);

        let first = store.create_user(&new_user).await.unwrap();
        assert!(matches!(first, CreateOutcome::Created(_)));

        let second = store.create_user(&new_user).await.unwrap();
        assert_eq!(second, CreateOutcome::Duplicate);

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(new_user.email.as_str())
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unknown_id_is_none() {
        let store = store().await;
        assert_eq!(store.find_user_by_id(-1).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_ordered_by_id() {
        let store = store().await;
        for tag in ["list-a", "list-b", "list-c"] {
            store
                .create_user(&NewUser::new(tag, unique_email(tag), None))
                .await
                .unwrap();
        }

        let users = store.list_users(ListParams::new(0, 1000)).await.unwrap();
        assert!(users.windows(2).all(|pair| pair[0].id < pair[1].id));

        let page = store.list_users(ListParams::new(1, 2)).await.unwrap();
        assert!(page.len() <= 2);
        if users.len() >= 3 {
            assert_eq!(page[0], users[1]);
        }
    }
}
