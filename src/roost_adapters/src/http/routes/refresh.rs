use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;

use roost_application::RefreshUseCase;
use roost_core::{CredentialStore, PasswordHasher, RefreshTokenStore, TokenIssuer};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh<C, R, H, T>(
    State(state): State<AppState<C, R, H, T>>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, AuthApiError>
where
    C: CredentialStore + Clone + 'static,
    R: RefreshTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let use_case = RefreshUseCase::new(state.refresh_token_store, state.token_issuer);

    let access_token = use_case.execute(&request.refresh_token).await?;

    Ok(Json(serde_json::json!({ "access_token": access_token })))
}
