//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` returned by every service and
//! handler. Each variant maps to exactly one HTTP status code, and every response body is
//! a small JSON object of the form `{"message": "..."}`.
//!
//! Internal failures (store, hashing, signing) are logged with their full detail but are
//! always rendered to the client as a generic message. `From` implementations for the
//! error types of the crates we lean on (`validator`, `jsonwebtoken`, `bcrypt`) and for our
//! own `StoreError` / `TokenError` allow the `?` operator to be used throughout.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::store::StoreError;

/// Represents all possible errors that can cross the service boundary.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing required fields (HTTP 400).
    InvalidInput(String),
    /// Missing, malformed, tampered or expired bearer token (HTTP 401).
    /// Deliberately carries no detail about which check failed.
    Unauthenticated,
    /// Login rejected (HTTP 401). Identical for unknown usernames and wrong passwords.
    InvalidCredentials,
    /// Registration conflict on the username (HTTP 409).
    UsernameTaken,
    /// Ownership-filtered lookup miss (HTTP 404).
    NotFound(String),
    /// Store, hashing or signing failure (HTTP 500).
    /// The detail is logged and never sent to the client.
    Internal(String),
}

impl AppError {
    /// The message placed in the JSON body sent to the client.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::InvalidInput(msg) => msg,
            AppError::Unauthenticated => "Authentication required",
            AppError::InvalidCredentials => "Invalid username or password",
            AppError::UsernameTaken => "Username is already taken",
            AppError::NotFound(msg) => msg,
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::UsernameTaken => write!(f, "Username taken"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            log::error!("internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.public_message()
        }))
    }
}

/// Validation failures keep their field-level detail; it only describes the client's input.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::InvalidInput(error.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::Internal(format!("store failure: {}", error))
    }
}

/// Every token rejection collapses to the same external signal.
impl From<TokenError> for AppError {
    fn from(_: TokenError) -> AppError {
        AppError::Unauthenticated
    }
}

/// Only signing goes through this path; decoding errors are classified as `TokenError`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Internal(format!("token signing failed: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("password hashing failed: {}", error))
    }
}
