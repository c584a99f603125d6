use credentials::HashCost;
use credentials::PasswordHasher;

use crate::user::errors::PasswordError;
use crate::user::ports::CredentialHasher;

/// Argon2id adapter for the domain hashing port.
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    inner: PasswordHasher,
}

impl Argon2CredentialHasher {
    pub fn with_cost(cost: HashCost) -> Result<Self, credentials::PasswordError> {
        PasswordHasher::with_cost(cost).map(|inner| Self { inner })
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.inner
            .hash(password)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, PasswordError> {
        self.inner
            .verify(password, password_hash)
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))
    }
}
