pub mod routes;

pub use routes::AuthApiError;

/// Shared state handed to every auth route.
///
/// All four collaborators are `Clone` (cheap handle clones over `Arc` or
/// a connection pool) so each request can hand owned copies to its use
/// case.
#[derive(Clone)]
pub struct AppState<C, R, H, T> {
    pub credential_store: C,
    pub refresh_token_store: R,
    pub password_hasher: H,
    pub token_issuer: T,
}

impl<C, R, H, T> AppState<C, R, H, T> {
    pub fn new(credential_store: C, refresh_token_store: R, password_hasher: H, token_issuer: T) -> Self {
        Self {
            credential_store,
            refresh_token_store,
            password_hasher,
            token_issuer,
        }
    }
}
