//! User stores
//!
//! `UserStore` is the seam between the HTTP layer and persistence.
//! Duplicate email is an outcome, not an error: `create_user` returns
//! `CreateOutcome::Duplicate` and leaves errors for real failures.

pub mod memory;
pub mod users;

use async_trait::async_trait;

use crate::models::{ListParams, NewUser, User};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Result of an insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Row inserted; carries the generated id
    Created(User),
    /// Another user already has this email; nothing was written
    Duplicate,
}

impl CreateOutcome {
    pub fn created(self) -> Option<User> {
        match self {
            Self::Created(user) => Some(user),
            Self::Duplicate => None,
        }
    }
}

/// Data-access operations over the `users` table
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup by email; first match if any.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    /// Lookup by primary key.
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, DbError>;

    /// Insert unless the email is already registered.
    ///
    /// The lookup and the insert are separate statements; two concurrent
    /// calls with the same email can both pass the lookup.
    async fn create_user(&self, new_user: &NewUser) -> Result<CreateOutcome, DbError>;

    /// Users in creation order, windowed by `params`.
    async fn list_users(&self, params: ListParams) -> Result<Vec<User>, DbError>;
}
