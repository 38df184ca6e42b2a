pub mod settings;

pub use settings::{ApplicationSettings, DatabaseSettings, JwtSettings, Settings};
