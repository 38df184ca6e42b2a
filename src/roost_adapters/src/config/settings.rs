use config::{Config, ConfigError, Environment};
use secrecy::Secret;
use serde::Deserialize;

use crate::security::jwt::{
    DEFAULT_ACCESS_TOKEN_TTL_SECONDS, DEFAULT_REFRESH_TOKEN_TTL_SECONDS, JwtConfig,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
}

impl Settings {
    /// Loads settings from the environment (prefix `AUTH`, `__` as the
    /// section separator), after sourcing a `.env` file when present.
    ///
    /// The signing secret (`AUTH__JWT__SECRET`) and database URL
    /// (`AUTH__DATABASE__URL`) have no defaults; a missing value fails
    /// the load and with it the service startup.
    pub fn load() -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3000)?
            .set_default("database.max_connections", 5)?
            .set_default(
                "jwt.access_token_ttl_seconds",
                DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "jwt.refresh_token_ttl_seconds",
                DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
            )?
            .add_source(
                Environment::with_prefix("AUTH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

impl From<&JwtSettings> for JwtConfig {
    fn from(settings: &JwtSettings) -> Self {
        JwtConfig {
            secret: settings.secret.clone(),
            access_ttl_seconds: settings.access_token_ttl_seconds,
            refresh_ttl_seconds: settings.refresh_token_ttl_seconds,
        }
    }
}
