use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;

/// One-way SHA-256 digest of a raw refresh token, hex-encoded.
///
/// The digest is the storage and lookup key for refresh tokens; the raw
/// signed token is never persisted. Safe to log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    pub fn of(raw_token: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(raw_token.as_bytes());
        TokenDigest(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Reconstructs a digest loaded back from storage.
impl From<String> for TokenDigest {
    fn from(stored: String) -> Self {
        TokenDigest(stored)
    }
}

impl std::fmt::Display for TokenDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted refresh token row. Only the digest of the issued token is
/// kept; expired rows are left in place.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub token_digest: TokenDigest,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}
