use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use roost_core::{Password, PasswordHashError, PasswordHasher};

/// Argon2id password hasher with a fresh salt per call.
///
/// Hashing and verification are CPU-bound, so both run on the blocking
/// thread pool with the caller's tracing span re-entered.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

fn argon2() -> Result<Argon2<'static>, PasswordHashError> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| PasswordHashError::Hashing(e.to_string()))?,
    ))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHashError> {
        let password = password.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| PasswordHashError::Hashing(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        stored_hash: &Secret<String>,
        candidate: &Password,
    ) -> Result<bool, PasswordHashError> {
        let stored_hash = stored_hash.clone();
        let candidate = candidate.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_hash = PasswordHash::new(stored_hash.expose_secret())
                    .map_err(|e| PasswordHashError::MalformedHash(e.to_string()))?;

                match argon2()?.verify_password(
                    candidate.as_ref().expose_secret().as_bytes(),
                    &expected_hash,
                ) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::Hashing(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
    }
}
