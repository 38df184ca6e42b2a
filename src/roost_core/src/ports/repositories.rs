use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    refresh_token::{RefreshTokenRecord, TokenDigest},
    user::{UserCredentials, UserId},
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persists user credentials. Email uniqueness is enforced by the
/// storage layer, not by callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create_user(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<UserId, CredentialStoreError>;

    async fn get_user_by_email(&self, email: &Email)
    -> Result<UserCredentials, CredentialStoreError>;
}

// RefreshTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RefreshTokenStoreError {
    #[error("Refresh token not found")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for RefreshTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TokenNotFound, Self::TokenNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persists refresh token digests. Digest uniqueness is a storage-layer
/// constraint.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn create_refresh_token(
        &self,
        token_digest: TokenDigest,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenStoreError>;

    async fn find_by_digest(
        &self,
        token_digest: &TokenDigest,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError>;
}
