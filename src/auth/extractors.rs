use actix_web::dev::Payload;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::state::AppContext;

/// The verified identity of the caller.
///
/// Taking this as a handler argument is what makes a route protected: extraction reads the
/// `Authorization: Bearer <token>` header, validates the token and yields the user id it
/// was issued for. Any failure short-circuits the request with a uniform 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.0
    }
}

/// Returns the credential of a `Bearer` authorization value.
/// The scheme is matched case-insensitively; an empty credential is rejected.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, credential) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let credential = credential.trim();
    if credential.is_empty() {
        return None;
    }
    Some(credential)
}

/// Resolves the caller from request headers.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            log::debug!("rejected request: missing or malformed authorization header");
            AppError::Unauthenticated
        })?;

    match tokens.validate(token) {
        Ok(user_id) => Ok(AuthenticatedUser(user_id)),
        Err(reason) => {
            log::debug!("rejected request: {}", reason);
            Err(reason.into())
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<AppContext>>() {
            Some(ctx) => authenticate(req.headers(), ctx.tokens()),
            None => Err(AppError::Internal(
                "AppContext is not registered as app data".to_string(),
            )),
        };
        ready(result.map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PasswordHasher;
    use crate::store::{MemoryTaskStore, MemoryUserStore};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use std::sync::Arc;

    const SECRET: &str = "extractor-secret";

    fn context() -> web::Data<AppContext> {
        web::Data::new(AppContext::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryTaskStore::new()),
            PasswordHasher::new(4).unwrap(),
            TokenService::new(SECRET),
        ))
    }

    #[::core::prelude::v1::test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let ctx = context();
        let token = ctx.tokens().issue(123).unwrap();
        let req = test::TestRequest::default()
            .app_data(ctx.clone())
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let mut payload = Payload::None;
        let user = AuthenticatedUser::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(user.id(), 123);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failures_are_uniform() {
        let ctx = context();
        let foreign = TokenService::new("other-secret").issue(1).unwrap();
        let expired = ctx
            .tokens()
            .issue_at(1, chrono::Utc::now() - chrono::Duration::hours(48))
            .unwrap();

        let headers = [
            None,
            Some("Token abc".to_string()),
            Some("Bearer garbage".to_string()),
            Some(format!("Bearer {}", foreign)),
            Some(format!("Bearer {}", expired)),
        ];

        for header in headers {
            let mut builder = test::TestRequest::default().app_data(ctx.clone());
            if let Some(value) = &header {
                builder = builder.insert_header((AUTHORIZATION, value.clone()));
            }
            let req = builder.to_http_request();

            let mut payload = Payload::None;
            let err = AuthenticatedUser::from_request(&req, &mut payload)
                .await
                .unwrap_err();
            let response = err.error_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", header);
        }
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_without_context() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
