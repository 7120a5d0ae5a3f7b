use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Todo,
    /// Task is currently being worked on.
    /// The web client spells this column `inProgress`.
    #[serde(alias = "inProgress")]
    InProgress,
    /// Task is finished.
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" | "inProgress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown status `{}`, expected one of: todo, in_progress, done",
                other
            )),
        }
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// System-assigned identifier, increasing with creation order.
    pub id: i32,
    /// Identifier of the owning user. Set from the authenticated caller at creation only.
    pub user_id: i32,
    pub title: String,
    pub status: TaskStatus,
    /// Independent of `status`.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /tasks`.
///
/// There is intentionally no owner field: any `userId` sent by the client is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: String,
    /// Absent, `null` and `""` all fall back to [`TaskStatus::Todo`].
    #[serde(default, deserialize_with = "empty_status_as_none")]
    pub status: Option<TaskStatus>,
}

/// A partial update. Only the fields present in the request are applied.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200), custom = "not_blank")]
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.completed.is_none()
    }

    /// Applies the supplied fields to `task`, leaving every other field untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn empty_status_as_none<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
