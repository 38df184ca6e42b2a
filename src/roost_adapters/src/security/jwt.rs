use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roost_core::{TokenIssueError, TokenIssuer, TokenPair, UserId};

pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Signing configuration, injected at construction. The secret is
/// process-wide and never rotated at runtime.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            access_ttl_seconds: DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Claims carried by both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: usize,
}

/// HS256 token issuer. Access and refresh tokens are signed with the
/// same secret and differ only in lifetime.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<TokenPair, TokenIssueError> {
        let access_expires_at = expiry_from_now(self.config.access_ttl_seconds)?;
        let refresh_expires_at = expiry_from_now(self.config.refresh_ttl_seconds)?;

        let access_token = sign_claims(
            &Claims {
                user_id: user_id.to_string(),
                exp: unix_seconds(access_expires_at)?,
            },
            self.config.as_bytes(),
        )?;

        let refresh_token = sign_claims(
            &Claims {
                user_id: user_id.to_string(),
                exp: unix_seconds(refresh_expires_at)?,
            },
            self.config.as_bytes(),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }
}

fn expiry_from_now(ttl_seconds: i64) -> Result<DateTime<Utc>, TokenIssueError> {
    let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or_else(|| {
        TokenIssueError::Signing("Failed to create token lifetime duration".to_string())
    })?;

    Utc::now()
        .checked_add_signed(delta)
        .ok_or_else(|| TokenIssueError::Signing("Token lifetime out of range".to_string()))
}

fn unix_seconds(expires_at: DateTime<Utc>) -> Result<usize, TokenIssueError> {
    expires_at
        .timestamp()
        .try_into()
        .map_err(|_| TokenIssueError::Signing("Failed to cast i64 to usize".to_string()))
}

fn sign_claims(claims: &Claims, secret: &[u8]) -> Result<String, TokenIssueError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenIssueError::Signing(e.to_string()))
}

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("Token error: {0}")]
    TokenError(jsonwebtoken::errors::Error),
}

/// Checks a token's signature and expiry and returns its claims.
///
/// Auth gateways use this for access tokens on incoming requests; the
/// refresh path does not call it because the digest lookup already
/// proves the token was issued here.
pub fn decode_token(token: &str, secret: &[u8]) -> Result<Claims, TokenDecodeError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenDecodeError::TokenError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(JwtConfig::new(Secret::from("secret".to_owned())))
    }

    fn assert_close(actual: usize, expected: i64) {
        let diff = (actual as i64 - expected).abs();
        assert!(diff <= 5, "expiry off by {diff}s");
    }

    #[test]
    fn issued_tokens_are_compact_jwts() {
        let pair = issuer().issue(&UserId::new()).unwrap();

        assert_eq!(pair.access_token.split('.').count(), 3);
        assert_eq!(pair.refresh_token.split('.').count(), 3);
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn access_token_carries_user_id_and_fifteen_minute_expiry() {
        let user_id = UserId::new();
        let pair = issuer().issue(&user_id).unwrap();

        let claims = decode_token(&pair.access_token, b"secret").unwrap();

        assert_eq!(claims.user_id, user_id.to_string());
        assert_close(
            claims.exp,
            (Utc::now() + chrono::Duration::minutes(15)).timestamp(),
        );
    }

    #[test]
    fn refresh_token_carries_seven_day_expiry() {
        let pair = issuer().issue(&UserId::new()).unwrap();

        let claims = decode_token(&pair.refresh_token, b"secret").unwrap();

        assert_close(
            claims.exp,
            (Utc::now() + chrono::Duration::days(7)).timestamp(),
        );
    }

    #[test]
    fn decoding_with_the_wrong_secret_fails() {
        let pair = issuer().issue(&UserId::new()).unwrap();

        assert!(decode_token(&pair.access_token, b"other-secret").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Past the decoder's leeway.
        let config = JwtConfig {
            secret: Secret::from("secret".to_owned()),
            access_ttl_seconds: -120,
            refresh_ttl_seconds: -120,
        };
        let pair = JwtTokenIssuer::new(config).issue(&UserId::new()).unwrap();

        assert!(decode_token(&pair.access_token, b"secret").is_err());
    }
}
