//! # Roost - Credential & Session Service Library
//!
//! This is a facade crate that re-exports all public APIs from the roost service components.
//! Use this crate to get access to the credential and session functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! roost = { path = "../roost" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `UserCredentials`, `TokenPair`, etc.
//! - **Repository traits**: `CredentialStore`, `RefreshTokenStore`
//! - **Service traits**: `PasswordHasher`, `TokenIssuer`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`
//! - **Adapters**: `PostgresCredentialStore`, `Argon2PasswordHasher`, `JwtTokenIssuer`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use roost_core::*;
}

// Re-export most commonly used core types at the root level
pub use roost_core::{
    Email, Password, RefreshTokenRecord, TokenDigest, TokenPair, UserCredentials, UserError, UserId,
};

// ============================================================================
// Repository & Service Traits (Ports)
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use roost_core::{
        CredentialStore, CredentialStoreError, PasswordHashError, PasswordHasher,
        RefreshTokenStore, RefreshTokenStoreError, TokenIssueError, TokenIssuer,
    };
}

// Re-export port traits at root level
pub use roost_core::{
    CredentialStore, CredentialStoreError, PasswordHashError, PasswordHasher, RefreshTokenStore,
    RefreshTokenStoreError, TokenIssueError, TokenIssuer,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use roost_application::*;
}

// Re-export use cases at root level
pub use roost_application::{
    LoginError, LoginUseCase, RefreshError, RefreshUseCase, RegisterError, RegisterUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use roost_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use roost_adapters::persistence::*;
    }

    /// Password hashing and token signing utilities
    pub mod security {
        pub use roost_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use roost_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use roost_adapters::{
    persistence::{HashMapCredentialStore, HashMapRefreshTokenStore, PostgresCredentialStore},
    security::{Argon2PasswordHasher, JwtConfig, JwtTokenIssuer, decode_token},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use roost_auth_service::{AuthService, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
