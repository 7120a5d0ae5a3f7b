pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskPatch, TaskStatus};
pub use user::{User, UserProfile};
