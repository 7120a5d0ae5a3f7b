use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{Task, TaskPatch, TaskStatus, User};

const USER_COLUMNS: &str = "id, username, password_hash, created_at";
const TASK_COLUMNS: &str = "id, user_id, title, status, completed, created_at";

/// Applies the migrations in `./migrations` to the connected database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    StoreError::UniqueViolation
                }
                other => StoreError::Database(other),
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(
        &self,
        owner_id: i32,
        title: &str,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        let sql = format!(
            "INSERT INTO tasks (user_id, title, status) VALUES ($1, $2, $3) RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(title)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Task>, StoreError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id ASC",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_owned(&self, id: i32, owner_id: i32) -> Result<Option<Task>, StoreError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_owned(
        &self,
        id: i32,
        owner_id: i32,
        patch: &TaskPatch,
    ) -> Result<Option<Task>, StoreError> {
        // NULL parameters keep the stored value.
        let sql = format!(
            "UPDATE tasks \
             SET title = COALESCE($3, title), \
                 status = COALESCE($4, status), \
                 completed = COALESCE($5, completed) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(patch.title.as_deref())
            .bind(patch.status)
            .bind(patch.completed)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_owned(&self, id: i32, owner_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
