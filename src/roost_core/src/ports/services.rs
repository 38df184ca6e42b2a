use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{password::Password, token_pair::TokenPair, user::UserId};

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

/// Salted, cost-parameterized one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError>;

    /// Returns `Ok(false)` on a plain mismatch. `Err` is reserved for a
    /// malformed stored hash or an internal hashing failure.
    async fn verify(
        &self,
        stored_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, PasswordHashError>;
}

#[derive(Debug, Error)]
pub enum TokenIssueError {
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Mints a signed access/refresh pair for a user identifier.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<TokenPair, TokenIssueError>;
}
