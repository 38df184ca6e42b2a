use roost_core::{
    RefreshTokenStore, RefreshTokenStoreError, TokenDigest, TokenIssueError, TokenIssuer,
};

/// Error types specific to the refresh use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Refresh token not found")]
    TokenNotFound,
    #[error("Refresh token expired")]
    TokenExpired,
    #[error("Failed to issue token pair: {0}")]
    TokenIssuance(#[from] TokenIssueError),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Refresh use case - exchanges a stored refresh token for a new access
/// token.
///
/// A full pair is minted for the token's owner, but only the access token
/// leaves this function: the freshly issued refresh token is discarded
/// without being persisted or returned, so the presented refresh token
/// keeps working until its own expiry. Expired rows are left in storage.
pub struct RefreshUseCase<R, T>
where
    R: RefreshTokenStore,
    T: TokenIssuer,
{
    refresh_token_store: R,
    token_issuer: T,
}

impl<R, T> RefreshUseCase<R, T>
where
    R: RefreshTokenStore,
    T: TokenIssuer,
{
    pub fn new(refresh_token_store: R, token_issuer: T) -> Self {
        Self {
            refresh_token_store,
            token_issuer,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, raw_refresh_token: &str) -> Result<String, RefreshError> {
        let digest = TokenDigest::of(raw_refresh_token);

        let record = self
            .refresh_token_store
            .find_by_digest(&digest)
            .await
            .map_err(|e| match e {
                RefreshTokenStoreError::TokenNotFound => RefreshError::TokenNotFound,
                other => {
                    tracing::error!(error = %other, "failed to look up refresh token");
                    RefreshError::Storage(other.to_string())
                }
            })?;

        if !record.is_valid() {
            return Err(RefreshError::TokenExpired);
        }

        let token_pair = self.token_issuer.issue(&record.user_id).map_err(|e| {
            tracing::error!(error = %e, user_id = %record.user_id, "failed to create token pair");
            e
        })?;

        Ok(token_pair.access_token)
    }
}
