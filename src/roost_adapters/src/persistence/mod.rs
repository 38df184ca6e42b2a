pub mod hashmap_store;
pub mod postgres_store;

pub use hashmap_store::{HashMapCredentialStore, HashMapRefreshTokenStore};
pub use postgres_store::PostgresCredentialStore;
