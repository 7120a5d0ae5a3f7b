use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::error::AppError;
use crate::models::User;
use crate::store::{StoreError, UserStore};

/// Registration and login.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    tokens: TokenService,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates a user and returns its id.
    ///
    /// Uniqueness is left to the store: of two concurrent registrations for the same
    /// username exactly one succeeds, the other gets `UsernameTaken`.
    pub async fn register(&self, username: &str, password: &str) -> Result<i32, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let hasher = Arc::clone(&self.hasher);
        let plaintext = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))??;

        match self.users.create(username, &password_hash).await {
            Ok(user) => {
                log::info!("registered user {} ({})", user.id, user.username);
                Ok(user.id)
            }
            Err(StoreError::UniqueViolation) => {
                log::warn!("registration rejected: username {:?} is taken", username);
                Err(AppError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Checks the credentials and issues a bearer token.
    ///
    /// An unknown username and a wrong password produce the same `InvalidCredentials`,
    /// and both paths run one bcrypt verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let user = self.users.find_by_username(username).await?;

        let hasher = Arc::clone(&self.hasher);
        let plaintext = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&plaintext, &hash),
            None => hasher.verify_decoy(&plaintext),
        })
        .await
        .unwrap_or_else(|e| {
            log::error!("password verification task failed: {}", e);
            false
        });

        match user {
            Some(user) if verified => {
                let token = self.tokens.issue(user.id)?;
                log::info!("user {} logged in", user.id);
                Ok(token)
            }
            _ => {
                log::warn!("login rejected for username {:?}", username);
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Loads the user an authenticated request was issued for.
    pub async fn current_user(&self, user_id: i32) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}
