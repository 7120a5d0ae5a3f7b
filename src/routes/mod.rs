pub mod auth;
pub mod health;
pub mod tasks;

use actix_cors::Cors;
use actix_web::{error::JsonPayloadError, http::header, web};

use crate::error::AppError;

/// Prefix under which the versioned API is mounted.
pub const API_PREFIX: &str = "/api/v1";

/// Registers the whole HTTP surface: `/health` plus the versioned API.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(health::health)
        .service(web::scope(API_PREFIX).configure(config));
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::me),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// Bodies that fail to parse (bad JSON, missing fields, unknown status) are a 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
            JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
            _ => "Invalid request body".to_string(),
        };
        AppError::InvalidInput(message).into()
    })
}

/// A task id that is not a number cannot name any task.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Task not found".to_string()).into())
}

/// CORS policy for the browser client at `allowed_origin`.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}
