use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How long an issued token stays valid.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token, the user's identifier.
    pub sub: i32,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Why a token was rejected. Only ever logged; clients see a single generic 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and validates HS256 tokens with a process-wide secret.
///
/// The secret is fixed for the lifetime of the service. There is no revocation: a token
/// stays valid until its expiry even if the user's password changes.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // No grace period; `decode` also rejects `exp == now`.
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issues a token for `user_id` valid for 24 hours from now.
    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issues a token as if it had been created at `issued_at`.
    pub fn issue_at(&self, user_id: i32, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verifies the signature and expiry of `token` and returns its claims.
    ///
    /// A token is only valid while the current time is before its expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Resolves `token` to the user identifier it was issued for.
    pub fn validate(&self, token: &str) -> Result<i32, TokenError> {
        self.decode(token).map(|claims| claims.sub)
    }
}
