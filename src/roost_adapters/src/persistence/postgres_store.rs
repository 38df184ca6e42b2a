use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use roost_core::{
    CredentialStore, CredentialStoreError, Email, RefreshTokenRecord, RefreshTokenStore,
    RefreshTokenStoreError, TokenDigest, UserCredentials, UserId,
};

/// Postgres-backed store for user credentials and refresh token digests.
///
/// Email and digest uniqueness are database constraints; concurrent
/// inserts race at the database, not here.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    token_digest: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create_user(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<UserId, CredentialStoreError> {
        let id = UserId::new();

        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(email.as_ref().expose_secret())
        .bind(password_hash.expose_secret());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::EmailAlreadyExists;
                }
            }
            CredentialStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(id)
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user_by_email(
        &self,
        email: &Email,
    ) -> Result<UserCredentials, CredentialStoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT id, email, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(CredentialStoreError::UserNotFound);
        };

        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        Ok(UserCredentials::new(
            UserId::from(row.id),
            email,
            Secret::from(row.password_hash),
        ))
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Storing refresh token in PostgreSQL", skip_all)]
    async fn create_refresh_token(
        &self,
        token_digest: TokenDigest,
        user_id: &UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO refresh_tokens (id, token_digest, user_id, expires_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(token_digest.as_str())
        .bind(user_id.as_uuid())
        .bind(expires_at);

        query
            .execute(&self.pool)
            .await
            .map_err(|e| RefreshTokenStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Looking up refresh token in PostgreSQL", skip_all)]
    async fn find_by_digest(
        &self,
        token_digest: &TokenDigest,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
        let row: Option<RefreshTokenRow> = sqlx::query_as(
            r#"
                SELECT id, token_digest, user_id, expires_at, created_at, updated_at
                FROM refresh_tokens
                WHERE token_digest = $1
            "#,
        )
        .bind(token_digest.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(RefreshTokenStoreError::TokenNotFound);
        };

        Ok(RefreshTokenRecord {
            id: row.id,
            token_digest: TokenDigest::from(row.token_digest),
            user_id: UserId::from(row.user_id),
            expires_at: row.expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
