use bcrypt::{hash, verify};

use crate::error::AppError;

/// Salted bcrypt hashing with a configurable work factor.
///
/// Holds a decoy hash computed at the same cost so a login for an unknown username can
/// spend as long verifying as a login with a wrong password.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    decoy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let decoy_hash = hash("decoy-password-never-matches", cost)?;
        Ok(Self { cost, decoy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Checks `password` against `hashed_password`. Errors count as a mismatch.
    pub fn verify(&self, password: &str, hashed_password: &str) -> bool {
        match verify(password, hashed_password) {
            Ok(matches) => matches,
            Err(e) => {
                log::error!("password verification failed: {}", e);
                false
            }
        }
    }

    /// Burns one verification against the decoy hash. Always returns `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.decoy_hash);
        false
    }
}
