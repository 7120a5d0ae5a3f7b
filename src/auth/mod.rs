pub mod extractors;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use password::PasswordHasher;
pub use token::{Claims, TokenError, TokenService};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, dots, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap();
}

/// Payload for both registration and login.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Must be between 1 and 64 characters: alphanumeric, underscores, dots or hyphens.
    #[validate(
        length(min = 1, max = 64),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, dots, or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Response body of a successful registration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token to present in the `Authorization` header.
    pub token: String,
}
