use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{email::Email, password::MIN_PASSWORD_LENGTH};

#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    PasswordTooShort,
}

/// Opaque user identifier, generated server-side when credentials are
/// first persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        UserId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        UserId(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Durable credential record: the only mutation path that sets
/// `password_hash` is creation.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    id: UserId,
    email: Email,
    password_hash: Secret<String>,
}

impl UserCredentials {
    pub fn new(id: UserId, email: Email, password_hash: Secret<String>) -> Self {
        Self {
            id,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }
}
