#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::json;

use tasktrack::auth::{LoginResponse, PasswordHasher, RegisterResponse, TokenService};
use tasktrack::routes;
use tasktrack::store::{MemoryTaskStore, MemoryUserStore};
use tasktrack::AppContext;

pub const SECRET: &str = "integration-test-secret";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub fn context_with_users(users: Arc<MemoryUserStore>) -> web::Data<AppContext> {
    web::Data::new(AppContext::new(
        users,
        Arc::new(MemoryTaskStore::new()),
        PasswordHasher::new(4).expect("cost 4 is valid"),
        TokenService::new(SECRET),
    ))
}

pub fn context() -> web::Data<AppContext> {
    context_with_users(Arc::new(MemoryUserStore::new()))
}

pub async fn init_app(
    ctx: web::Data<AppContext>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(ctx)
            .wrap(routes::cors(ALLOWED_ORIGIN))
            .wrap(Logger::default())
            .configure(routes::configure_app),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> i32 {
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::CREATED,
        "registration of {} failed",
        username
    );
    let body: RegisterResponse = test::read_body_json(resp).await;
    body.user_id
}

pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::OK,
        "login of {} failed",
        username
    );
    let body: LoginResponse = test::read_body_json(resp).await;
    body.token
}

/// Registers and logs in, returning `(user_id, token)`.
pub async fn signed_up(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> (i32, String) {
    let user_id = register(app, username, password).await;
    let token = login(app, username, password).await;
    (user_id, token)
}
