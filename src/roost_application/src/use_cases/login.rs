use roost_core::{
    CredentialStore, CredentialStoreError, Email, Password, PasswordHashError, PasswordHasher,
    RefreshTokenStore, TokenDigest, TokenIssueError, TokenIssuer, TokenPair,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User with this email not found")]
    EmailNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Failed to verify password: {0}")]
    PasswordHash(#[from] PasswordHashError),
    #[error("Failed to issue token pair: {0}")]
    TokenIssuance(#[from] TokenIssueError),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Login use case - authenticates stored credentials and issues a fresh
/// token pair.
///
/// Every successful login persists an additional refresh-token row;
/// earlier rows stay valid until they expire on their own.
pub struct LoginUseCase<C, R, H, T>
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

impl<C, R, H, T> LoginUseCase<C, R, H, T>
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

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<TokenPair, LoginError> {
        let user = self
            .credential_store
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                CredentialStoreError::UserNotFound => LoginError::EmailNotFound,
                other => {
                    tracing::error!(error = %other, "failed to get user by email");
                    LoginError::Storage(other.to_string())
                }
            })?;

        let matches = self
            .password_hasher
            .verify(user.password_hash(), &password)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to compare password");
                e
            })?;
        if !matches {
            return Err(LoginError::InvalidPassword);
        }

        let token_pair = self.token_issuer.issue(user.id()).map_err(|e| {
            tracing::error!(error = %e, user_id = %user.id(), "failed to create token pair");
            e
        })?;

        let digest = TokenDigest::of(&token_pair.refresh_token);
        self.refresh_token_store
            .create_refresh_token(digest, user.id(), token_pair.refresh_expires_at)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id(), "failed to store refresh token");
                LoginError::Storage(e.to_string())
            })?;

        Ok(token_pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::register::tests::{
        MockCredentialStore, MockPasswordHasher, MockRefreshTokenStore, MockTokenIssuer, email,
        password,
    };

    async fn seeded_store(email_addr: &str, plaintext: &str) -> MockCredentialStore {
        let store = MockCredentialStore::default();
        let hasher = MockPasswordHasher::default();
        let hash = hasher.hash(&password(plaintext)).await.unwrap();
        store.create_user(&email(email_addr), hash).await.unwrap();
        store
    }

    #[tokio::test]
    async fn login_with_correct_credentials_issues_pair() {
        let refresh_store = MockRefreshTokenStore::default();
        let use_case = LoginUseCase::new(
            seeded_store("a@x.com", "secret1").await,
            refresh_store.clone(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        let pair = use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        assert!(
            refresh_store
                .get(&TokenDigest::of(&pair.refresh_token))
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn login_with_unknown_email_fails() {
        let use_case = LoginUseCase::new(
            MockCredentialStore::default(),
            MockRefreshTokenStore::default(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        let result = use_case.execute(email("a@x.com"), password("secret1")).await;

        assert!(matches!(result, Err(LoginError::EmailNotFound)));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let use_case = LoginUseCase::new(
            seeded_store("a@x.com", "secret1").await,
            MockRefreshTokenStore::default(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        let result = use_case
            .execute(email("a@x.com"), password("wrong-password"))
            .await;

        assert!(matches!(result, Err(LoginError::InvalidPassword)));
    }

    #[tokio::test]
    async fn each_login_persists_another_refresh_row() {
        let refresh_store = MockRefreshTokenStore::default();
        let use_case = LoginUseCase::new(
            seeded_store("a@x.com", "secret1").await,
            refresh_store.clone(),
            MockPasswordHasher::default(),
            MockTokenIssuer::default(),
        );

        use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();
        use_case
            .execute(email("a@x.com"), password("secret1"))
            .await
            .unwrap();

        // Old rows are never invalidated or pruned.
        assert_eq!(refresh_store.len().await, 2);
    }
}
