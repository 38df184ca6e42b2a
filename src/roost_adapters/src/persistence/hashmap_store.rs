use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use roost_core::{
    CredentialStore, CredentialStoreError, Email, RefreshTokenRecord, RefreshTokenStore,
    RefreshTokenStoreError, TokenDigest, UserCredentials, UserId,
};

/// In-memory credential store used by tests and local experiments.
#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    users: Arc<RwLock<HashMap<Email, UserCredentials>>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn create_user(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<UserId, CredentialStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(CredentialStoreError::EmailAlreadyExists);
        }
        let id = UserId::new();
        users.insert(
            email.clone(),
            UserCredentials::new(id, email.clone(), password_hash),
        );
        Ok(id)
    }

    async fn get_user_by_email(
        &self,
        email: &Email,
    ) -> Result<UserCredentials, CredentialStoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }
}

/// In-memory refresh token store keyed by token digest.
#[derive(Default, Clone)]
pub struct HashMapRefreshTokenStore {
    records: Arc<RwLock<HashMap<TokenDigest, RefreshTokenRecord>>>,
}

impl HashMapRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for HashMapRefreshTokenStore {
    async fn create_refresh_token(
        &self,
        token_digest: TokenDigest,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenStoreError> {
        let now = Utc::now();
        let record = RefreshTokenRecord {
            id: Uuid::new_v4(),
            token_digest: token_digest.clone(),
            user_id: *user_id,
            expires_at,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.insert(token_digest, record);
        Ok(())
    }

    async fn find_by_digest(
        &self,
        token_digest: &TokenDigest,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
        self.records
            .read()
            .await
            .get(token_digest)
            .cloned()
            .ok_or(RefreshTokenStoreError::TokenNotFound)
    }
}
