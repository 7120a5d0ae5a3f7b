//! Persistence seams.
//!
//! Services talk to storage only through the [`UserStore`] and [`TaskStore`] traits. The
//! production implementations live in [`postgres`]; [`memory`] provides in-process stores
//! with the same uniqueness and ownership semantics, used by the test suites.
//!
//! Every task write targets a single row selected by `(id, owner)`, so the atomicity of a
//! single statement is all the consistency the service needs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{Task, TaskPatch, TaskStatus, User};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user. Fails with [`StoreError::UniqueViolation`] when the username exists.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, owner_id: i32, title: &str, status: TaskStatus)
        -> Result<Task, StoreError>;

    /// All tasks owned by `owner_id`, ordered by id ascending.
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, StoreError>;

    async fn find_owned(&self, id: i32, owner_id: i32) -> Result<Option<Task>, StoreError>;

    /// Applies `patch` to the task matching `(id, owner_id)`.
    /// Returns `None` when no such row exists.
    async fn update_owned(
        &self,
        id: i32,
        owner_id: i32,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, StoreError>;

    /// Returns whether a row matching `(id, owner_id)` was deleted.
    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<bool, StoreError>;
}
