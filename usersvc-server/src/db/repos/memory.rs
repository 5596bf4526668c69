//! In-process user store
//!
//! Same contract as `PgUserStore`: ids start at 1 and increase, listing
//! follows insertion order. The write lock is held across the email
//! check and the insert, so this store never admits a duplicate.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CreateOutcome, DbError, UserStore};
use crate::models::{ListParams, NewUser, User};

#[derive(Debug)]
struct Table {
    rows: Vec<User>,
    next_id: i64,
}

/// User store kept in memory; clones share the same table
#[derive(Debug, Clone)]
pub struct MemoryUserStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<CreateOutcome, DbError> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.email == new_user.email.as_str()) {
            tracing::debug!(email = %new_user.email, "email already registered");
            return Ok(CreateOutcome::Duplicate);
        }

        let user = User {
            id: table.next_id,
            name: new_user.name.clone(),
            email: new_user.email.as_str().to_owned(),
            bio: new_user.bio.clone(),
        };
        table.next_id += 1;
        table.rows.push(user.clone());

        Ok(CreateOutcome::Created(user))
    }

    async fn list_users(&self, params: ListParams) -> Result<Vec<User>, DbError> {
        let table = self.table.read().await;
        Ok(params.window(&table.rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Email;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser::new(name, Email::new(email).unwrap(), None)
    }

    #[tokio::test]
    async fn ids_start_at_one() {
        let store = MemoryUserStore::new();
        let first = store
            .create_user(&new_user("Ivan", "ivan@example.com"))
            .await
            .unwrap()
            .created()
            .unwrap();
        let second = store
            .create_user(&new_user("Anna", "anna@example.com"))
            .await
            .unwrap()
            .created()
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        let input = new_user("Petr", "petr@example.com");

        assert!(matches!(
            store.create_user(&input).await.unwrap(),
            CreateOutcome::Created(_)
        ));
        let other_name = new_user("Someone Else", "petr@example.com");
        assert_eq!(
            store.create_user(&other_name).await.unwrap(),
            CreateOutcome::Duplicate
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let store = MemoryUserStore::new();
        store
            .create_user(&new_user("Ivan", "ivan@example.com"))
            .await
            .unwrap();

        assert!(store
            .find_user_by_email("ivan@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_user_by_email("IVAN@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn find_by_id() {
        let store = MemoryUserStore::new();
        let created = store
            .create_user(&new_user("Ivan", "ivan@example.com"))
            .await
            .unwrap()
            .created()
            .unwrap();

        assert_eq!(store.find_user_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(store.find_user_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_respects_window() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            store
                .create_user(&new_user(&format!("User {i}"), &format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let all = store.list_users(ListParams::default()).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|pair| pair[0].id < pair[1].id));

        let page = store.list_users(ListParams::new(1, 2)).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["User 1", "User 2"]);

        assert!(store
            .list_users(ListParams::new(10, 2))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn concurrent_creates_admit_one() {
        let store = MemoryUserStore::new();
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_user(&new_user("Racer", "race@example.com"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if let CreateOutcome::Created(_) = handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
