pub mod auth_service;
pub mod helpers;
mod tracing;

pub use auth_service::AuthService;
pub use helpers::get_postgres_pool;
