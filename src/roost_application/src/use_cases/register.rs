use roost_core::{
    CredentialStore, CredentialStoreError, Email, Password, PasswordHashError, PasswordHasher,
    RefreshTokenStore, TokenDigest, TokenIssueError, TokenIssuer, TokenPair,
};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Failed to hash password: {0}")]
    PasswordHash(#[from] PasswordHashError),
    #[error("Failed to issue token pair: {0}")]
    TokenIssuance(#[from] TokenIssueError),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Register use case - creates credentials and issues the first token pair.
///
/// The sequence is not transactional: if persisting the refresh token
/// digest fails, the already-created user row stays in place and the
/// caller sees a storage error. Retrying the registration then reports
/// the email as taken.
pub struct RegisterUseCase<C, R, H, T>
where
    C: CredentialStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    credential_store: C,
    refresh_token_store: R,
    password_hasher: H,
    token_issuer: T,
}

impl<C, R, H, T> RegisterUseCase<C, R, H, T>
where
    C: CredentialStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(
        credential_store: C,
        refresh_token_store: R,
        password_hasher: H,
        token_issuer: T,
    ) -> Self {
        Self {
            credential_store,
            refresh_token_store,
            password_hasher,
            token_issuer,
        }
    }

    /// Execute the register use case
    ///
    /// # Returns
    /// The freshly issued token pair for the new user.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<TokenPair, RegisterError> {
        let password_hash = self.password_hasher.hash(&password).await.map_err(|e| {
            tracing::error!(error = %e, "failed to hash password");
            e
        })?;

        let user_id = self
            .credential_store
            .create_user(&email, password_hash)
            .await
            .map_err(|e| match e {
                CredentialStoreError::EmailAlreadyExists => RegisterError::EmailAlreadyExists,
                other => {
                    tracing::error!(error = %other, "failed to save new user credentials");
                    RegisterError::Storage(other.to_string())
                }
            })?;

        let token_pair = self.token_issuer.issue(&user_id).map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "failed to create token pair");
            e
        })?;

        let digest = TokenDigest::of(&token_pair.refresh_token);
        self.refresh_token_store
            .create_refresh_token(digest, &user_id, token_pair.refresh_expires_at)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "failed to store refresh token");
                RegisterError::Storage(e.to_string())
            })?;

        Ok(token_pair)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use secrecy::{ExposeSecret, Secret};
    use tokio::sync::RwLock;

    use roost_core::{RefreshTokenRecord, RefreshTokenStoreError, UserCredentials, UserId};
    use uuid::Uuid;

    use super::*;

    // Shared mock implementations, also used by the login and refresh
    // use case tests.

    #[derive(Default, Clone)]
    pub(crate) struct MockCredentialStore {
        users: Arc<RwLock<HashMap<Email, UserCredentials>>>,
    }

    impl MockCredentialStore {
        pub(crate) async fn contains(&self, email: &Email) -> bool {
            self.users.read().await.contains_key(email)
        }
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
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

    #[derive(Default, Clone)]
    pub(crate) struct MockRefreshTokenStore {
        records: Arc<RwLock<HashMap<TokenDigest, RefreshTokenRecord>>>,
    }

    impl MockRefreshTokenStore {
        pub(crate) async fn len(&self) -> usize {
            self.records.read().await.len()
        }

        pub(crate) async fn get(&self, digest: &TokenDigest) -> Option<RefreshTokenRecord> {
            self.records.read().await.get(digest).cloned()
        }

        pub(crate) async fn insert_expiring_at(
            &self,
            raw_token: &str,
            user_id: UserId,
            expires_at: DateTime<Utc>,
        ) {
            let digest = TokenDigest::of(raw_token);
            let record = RefreshTokenRecord {
                id: Uuid::new_v4(),
                token_digest: digest.clone(),
                user_id,
                expires_at,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.records.write().await.insert(digest, record);
        }
    }

    #[async_trait]
    impl RefreshTokenStore for MockRefreshTokenStore {
        async fn create_refresh_token(
            &self,
            token_digest: TokenDigest,
            user_id: &UserId,
            expires_at: DateTime<Utc>,
        ) -> Result<(), RefreshTokenStoreError> {
            let record = RefreshTokenRecord {
                id: Uuid::new_v4(),
                token_digest: token_digest.clone(),
                user_id: *user_id,
                expires_at,
                created_at: Utc::now(),
                updated_at: Utc::now(),
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

    #[derive(Clone)]
    pub(crate) struct FailingRefreshTokenStore;

    #[async_trait]
    impl RefreshTokenStore for FailingRefreshTokenStore {
        async fn create_refresh_token(
            &self,
            _token_digest: TokenDigest,
            _user_id: &UserId,
            _expires_at: DateTime<Utc>,
        ) -> Result<(), RefreshTokenStoreError> {
            Err(RefreshTokenStoreError::UnexpectedError(
                "connection reset".to_owned(),
            ))
        }

        async fn find_by_digest(
            &self,
            _token_digest: &TokenDigest,
        ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
            Err(RefreshTokenStoreError::UnexpectedError(
                "connection reset".to_owned(),
            ))
        }
    }

    /// Fake hasher: `hash` prefixes the plaintext, `verify` compares.
    #[derive(Default, Clone)]
    pub(crate) struct MockPasswordHasher {
        pub(crate) fail: bool,
    }

    #[async_trait]
    impl PasswordHasher for MockPasswordHasher {
        async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError> {
            if self.fail {
                return Err(PasswordHashError::Hashing("out of memory".to_owned()));
            }
            Ok(Secret::from(format!(
                "hashed:{}",
                password.as_ref().expose_secret()
            )))
        }

        async fn verify(
            &self,
            stored_hash: &Secret<String>,
            candidate: &Password,
        ) -> Result<bool, PasswordHashError> {
            if self.fail {
                return Err(PasswordHashError::Hashing("out of memory".to_owned()));
            }
            let expected = format!("hashed:{}", candidate.as_ref().expose_secret());
            Ok(stored_hash.expose_secret() == &expected)
        }
    }

    /// Fake issuer: deterministic token strings with a per-call nonce so
    /// every issued refresh token is distinct.
    #[derive(Default, Clone)]
    pub(crate) struct MockTokenIssuer {
        pub(crate) fail: bool,
        nonce: Arc<AtomicU64>,
    }

    impl TokenIssuer for MockTokenIssuer {
        fn issue(&self, user_id: &UserId) -> Result<TokenPair, TokenIssueError> {
            if self.fail {
                return Err(TokenIssueError::Signing("bad key".to_owned()));
            }
            let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
            Ok(TokenPair {
                access_token: format!("access-{user_id}-{nonce}"),
                refresh_token: format!("refresh-{user_id}-{nonce}"),
                access_expires_at: Utc::now() + Duration::minutes(15),
                refresh_expires_at: Utc::now() + Duration::days(7),
            })
        }
    }

    pub(crate) fn email(s: &str) -> Email {
        Email::try_from(Secret::from(s.to_owned())).unwrap()
    }

    pub(crate) fn password(s: &str) -> Password {
        Password::try_from(Secret::from(s.to_owned())).unwrap()
    }

    #[tokio::test]
    async fn register_issues_pair_and_persists_refresh_digest() {
        let refresh_store = MockRefreshTokenStore::default();
        let use_case = RegisterUseCase::new(
            MockCredentialStore::default(),
            refresh_store.clone(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        let pair = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        let stored = refresh_store
            .get(&TokenDigest::of(&pair.refresh_token))
            .await
            .expect("refresh token digest should be persisted");
        assert_eq!(stored.expires_at, pair.refresh_expires_at);
        assert!(pair.access_expires_at < pair.refresh_expires_at);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let use_case = RegisterUseCase::new(
            MockCredentialStore::default(),
            MockRefreshTokenStore::default(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();
        let second = use_case.execute(email("a@x.com"), password("other-pw")).await;

        assert!(matches!(second, Err(RegisterError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn register_surfaces_hashing_failure() {
        let use_case = RegisterUseCase::new(
            MockCredentialStore::default(),
            MockRefreshTokenStore::default(),
            MockPasswordHasher { fail: true },
            MockTokenIssuer::default(),
        );

        let result = use_case.execute(email("a@x.com"), password("secret1")).await;

        assert!(matches!(result, Err(RegisterError::PasswordHash(_))));
    }

    #[tokio::test]
    async fn register_surfaces_signing_failure_after_user_creation() {
        let credential_store = MockCredentialStore::default();
        let use_case = RegisterUseCase::new(
            credential_store.clone(),
            MockRefreshTokenStore::default(),
            MockPasswordHasher::default(),
            MockTokenIssuer {
                fail: true,
                ..Default::default()
            },
        );

        let result = use_case.execute(email("a@x.com"), password("secret1")).await;

        assert!(matches!(result, Err(RegisterError::TokenIssuance(_))));
        // The user row is not rolled back.
        assert!(credential_store.contains(&email("a@x.com")).await);
    }

    #[tokio::test]
    async fn register_leaves_user_in_place_when_refresh_persist_fails() {
        let credential_store = MockCredentialStore::default();
        let use_case = RegisterUseCase::new(
            credential_store.clone(),
            FailingRefreshTokenStore,
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        let result = use_case.execute(email("a@x.com"), password("secret1")).await;

        assert!(matches!(result, Err(RegisterError::Storage(_))));
        assert!(credential_store.contains(&email("a@x.com")).await);
    }
}
