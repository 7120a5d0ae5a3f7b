use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Task, TaskPatch, TaskStatus};
use crate::store::TaskStore;

/// Ownership-scoped task operations.
///
/// Every method takes the caller's id from the auth gate and filters by it. A task that
/// exists but belongs to someone else is reported exactly like one that does not exist.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

fn not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Creates a task owned by `caller_id`. A missing status defaults to `todo`.
    pub async fn create(
        &self,
        caller_id: i32,
        title: &str,
        status: Option<TaskStatus>,
    ) -> Result<Task, AppError> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput("Title is required".to_string()));
        }
        let task = self
            .tasks
            .insert(caller_id, title, status.unwrap_or_default())
            .await?;
        log::info!("user {} created task {}", caller_id, task.id);
        Ok(task)
    }

    /// The caller's tasks, ordered by id ascending. May be empty.
    pub async fn list_mine(&self, caller_id: i32) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.list_by_owner(caller_id).await?)
    }

    pub async fn get(&self, caller_id: i32, task_id: i32) -> Result<Task, AppError> {
        self.tasks
            .find_owned(task_id, caller_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Applies only the fields present in `patch`.
    pub async fn update(
        &self,
        caller_id: i32,
        task_id: i32,
        patch: &TaskPatch,
    ) -> Result<Task, AppError> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one of title, status or completed must be provided".to_string(),
            ));
        }
        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(AppError::InvalidInput("Title must not be empty".to_string()));
        }

        let task = self
            .tasks
            .update_owned(task_id, caller_id, patch)
            .await?
            .ok_or_else(not_found)?;
        log::info!("user {} updated task {}", caller_id, task.id);
        Ok(task)
    }

    /// Deletes the caller's task. A miss is reported as `NotFound`, same as `update`.
    pub async fn delete(&self, caller_id: i32, task_id: i32) -> Result<(), AppError> {
        if !self.tasks.delete_owned(task_id, caller_id).await? {
            return Err(not_found());
        }
        log::info!("user {} deleted task {}", caller_id, task_id);
        Ok(())
    }
}
