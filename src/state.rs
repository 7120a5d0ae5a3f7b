use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::services::{CredentialService, TaskService};
use crate::store::{TaskStore, UserStore};

/// Everything a request handler needs, built once at startup and shared immutably.
#[derive(Clone)]
pub struct AppContext {
    credentials: CredentialService,
    tasks: TaskService,
    tokens: TokenService,
}

impl AppContext {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            credentials: CredentialService::new(users, Arc::new(hasher), tokens.clone()),
            tasks: TaskService::new(tasks),
            tokens,
        }
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
