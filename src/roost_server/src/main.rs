use color_eyre::eyre::Result;
use roost_adapters::{
    config::Settings,
    persistence::PostgresCredentialStore,
    security::{Argon2PasswordHasher, JwtConfig, JwtTokenIssuer},
};
use roost_auth_service::{AuthService, get_postgres_pool};
use secrecy::ExposeSecret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Startup is fatal without a signing secret or database URL.
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = get_postgres_pool(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await?;
    sqlx::migrate!().run(&pg_pool).await?;

    // Create stores and security collaborators
    let credential_store = PostgresCredentialStore::new(pg_pool);
    let password_hasher = Argon2PasswordHasher::default();
    let token_issuer = JwtTokenIssuer::new(JwtConfig::from(&settings.jwt));

    // One Postgres store backs both the credential and the refresh token
    // side.
    let auth_service = AuthService::new(
        credential_store.clone(),
        credential_store,
        password_hasher,
        token_issuer,
    );

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("auth service starting");

    auth_service.run_standalone(listener).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
