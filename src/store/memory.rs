//! In-process stores backed by vectors behind a `tokio::sync::Mutex`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{Task, TaskPatch, TaskStatus, User};

struct Table<T> {
    next_id: i32,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    table: Mutex<Table<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users with exactly this username.
    pub async fn count_username(&self, username: &str) -> usize {
        let table = self.table.lock().await;
        table.rows.iter().filter(|u| u.username == username).count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut table = self.table.lock().await;
        if table.rows.iter().any(|u| u.username == username) {
            return Err(StoreError::UniqueViolation);
        }
        let user = User {
            id: table.allocate_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let table = self.table.lock().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemoryTaskStore {
    table: Mutex<Table<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(
        &self,
        owner_id: i32,
        title: &str,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        let mut table = self.table.lock().await;
        let task = Task {
            id: table.allocate_id(),
            user_id: owner_id,
            title: title.to_string(),
            status,
            completed: false,
            created_at: Utc::now(),
        };
        table.rows.push(task.clone());
        Ok(task)
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, StoreError> {
        let table = self.table.lock().await;
        let mut tasks: Vec<Task> = table
            .rows
            .iter()
            .filter(|t| t.user_id == owner_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn find_owned(&self, id: i32, owner_id: i32) -> Result<Option<Task>, StoreError> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .find(|t| t.id == id && t.user_id == owner_id)
            .cloned())
    }

    async fn update_owned(
        &self,
        id: i32,
        owner_id: i32,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        let mut table = self.table.lock().await;
        let updated = table
            .rows
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner_id)
            .map(|task| {
                patch.apply_to(task);
                task.clone()
            });
        Ok(updated)
    }

    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<bool, StoreError> {
        let mut table = self.table.lock().await;
        let before = table.rows.len();
        table.rows.retain(|t| !(t.id == id && t.user_id == owner_id));
        Ok(table.rows.len() < before)
    }
}
