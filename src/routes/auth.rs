use crate::{
    auth::{AuthenticatedUser, CredentialsRequest, LoginResponse, RegisterResponse},
    error::AppError,
    models::UserProfile,
    state::AppContext,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Returns `201 {message, userId}`; `400` for invalid input and `409` when the username
/// is taken.
#[post("/register")]
pub async fn register(
    ctx: web::Data<AppContext>,
    register_data: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user_id = ctx
        .credentials()
        .register(&register_data.username, &register_data.password)
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id,
    }))
}

/// Login user
///
/// Returns `200 {token}`. Unknown usernames and wrong passwords both yield the same `401`.
/// The username format is not validated here so a bad format cannot be told apart from
/// an unknown account.
#[post("/login")]
pub async fn login(
    ctx: web::Data<AppContext>,
    login_data: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    let token = ctx
        .credentials()
        .login(&login_data.username, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// The profile of the user the bearer token was issued for.
#[get("/me")]
pub async fn me(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = ctx.credentials().current_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
