pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    refresh_token::{RefreshTokenRecord, TokenDigest},
    token_pair::TokenPair,
    user::{UserCredentials, UserError, UserId},
};

pub use ports::{
    repositories::{
        CredentialStore, CredentialStoreError, RefreshTokenStore, RefreshTokenStoreError,
    },
    services::{PasswordHashError, PasswordHasher, TokenIssueError, TokenIssuer},
};
