use actix_web::{get, HttpResponse, Responder};

/// Health check endpoint
///
/// Answers `200 ok` in plain text. Needs no authentication and touches no storage.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}
