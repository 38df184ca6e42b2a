use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;

use roost_application::LoginUseCase;
use roost_core::{
    CredentialStore, Email, Password, PasswordHasher, RefreshTokenStore, TokenIssuer,
};

use super::error::AuthApiError;
use super::register::TokenPairResponse;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<C, R, H, T>(
    State(state): State<AppState<C, R, H, T>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    C: CredentialStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(
        state.credential_store,
        state.refresh_token_store,
        state.password_hasher,
        state.token_issuer,
    );

    let token_pair = use_case.execute(email, password).await?;

    Ok((StatusCode::CREATED, Json(TokenPairResponse::from(token_pair))))
}
