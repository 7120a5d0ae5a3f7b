use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, TaskPatch},
    state::AppContext,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects ordered by id, possibly empty.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = ctx.tasks().list_mine(user.id()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The owner is always the caller; an owner field in the body is ignored.
///
/// ## Request Body:
/// - `title`: required, non-blank.
/// - `status` (optional): `todo` (default), `in_progress` or `done`.
///
/// ## Responses:
/// - `201 Created`: the new `Task`.
/// - `400 Bad Request`: invalid body.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = ctx
        .tasks()
        .create(user.id(), &task_data.title, task_data.status)
        .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves one of the caller's tasks; `404` if it does not exist or is not theirs.
#[get("/{id}")]
pub async fn get_task(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let task = ctx.tasks().get(user.id(), task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates one of the caller's tasks.
///
/// ## Request Body:
/// Any non-empty subset of `title`, `status`, `completed`. Omitted fields keep their
/// current values.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `400 Bad Request`: empty or invalid patch.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this user.
#[patch("/{id}")]
pub async fn update_task(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
    patch: web::Json<TaskPatch>,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let task = ctx
        .tasks()
        .update(user.id(), task_id.into_inner(), &patch)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the caller's tasks; `404` if it does not exist or is not theirs.
#[delete("/{id}")]
pub async fn delete_task(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    ctx.tasks().delete(user.id(), task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully"
    })))
}
