use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roost_application::{LoginError, RefreshError, RegisterError};
use roost_core::UserError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("User with provided email already exists")]
    EmailAlreadyExists,

    #[error("User with provided email was not found")]
    EmailNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AuthApiError::InvalidInput(_) | AuthApiError::RefreshTokenNotFound => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AuthApiError::EmailAlreadyExists => (StatusCode::CONFLICT, self.to_string()),

            AuthApiError::EmailNotFound
            | AuthApiError::InvalidPassword
            | AuthApiError::RefreshTokenExpired => (StatusCode::UNAUTHORIZED, self.to_string()),

            AuthApiError::UnexpectedError(detail) => {
                // The detail stays in the log; callers get a fixed body.
                tracing::error!(error = %detail, "request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::EmailAlreadyExists => AuthApiError::EmailAlreadyExists,
            RegisterError::PasswordHash(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::TokenIssuance(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::Storage(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::EmailNotFound => AuthApiError::EmailNotFound,
            LoginError::InvalidPassword => AuthApiError::InvalidPassword,
            LoginError::PasswordHash(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::TokenIssuance(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::Storage(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::TokenNotFound => AuthApiError::RefreshTokenNotFound,
            RefreshError::TokenExpired => AuthApiError::RefreshTokenExpired,
            RefreshError::TokenIssuance(e) => AuthApiError::UnexpectedError(e.to_string()),
            RefreshError::Storage(e) => AuthApiError::UnexpectedError(e),
        }
    }
}
