use axum::{Router, routing::post};
use roost_adapters::http::{
    AppState,
    routes::{login, refresh, register},
};
use roost_core::{CredentialStore, PasswordHasher, RefreshTokenStore, TokenIssuer};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides the credential and session
/// routes.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService from the four collaborators.
    ///
    /// # Arguments
    /// * `credential_store` - Store for user credentials (must be Clone)
    /// * `refresh_token_store` - Store for refresh token digests (must be Clone)
    /// * `password_hasher` - Salted one-way password hasher (must be Clone)
    /// * `token_issuer` - Signed token pair issuer (must be Clone)
    ///
    /// A Postgres deployment passes the same `PostgresCredentialStore`
    /// clone for both stores; tests pass the in-memory pair.
    pub fn new<C, R, H, T>(
        credential_store: C,
        refresh_token_store: R,
        password_hasher: H,
        token_issuer: T,
    ) -> Self
    where
        C: CredentialStore + Clone + 'static,
        R: RefreshTokenStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let state = AppState::new(
            credential_store,
            refresh_token_store,
            password_hasher,
            token_issuer,
        );

        let router = Router::new()
            .route("/auth/register", post(register::<C, R, H, T>))
            .route("/auth/login", post(login::<C, R, H, T>))
            .route("/auth/refresh", post(refresh::<C, R, H, T>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be nested into
    /// another application.
    pub fn into_router(self) -> Router {
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server.
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
