use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use roost_application::RegisterUseCase;
use roost_core::{
    CredentialStore, Email, Password, PasswordHasher, RefreshTokenStore, TokenIssuer, TokenPair,
};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Response body shared by register and login.
#[derive(Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        TokenPairResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<C, R, H, T>(
    State(state): State<AppState<C, R, H, T>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    C: CredentialStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(
        state.credential_store,
        state.refresh_token_store,
        state.password_hasher,
        state.token_issuer,
    );

    let token_pair = use_case.execute(email, password).await?;

    Ok((StatusCode::CREATED, Json(TokenPairResponse::from(token_pair))))
}
