pub mod error;
pub mod login;
pub mod refresh;
pub mod register;

pub use error::AuthApiError;
pub use login::{LoginRequest, login};
pub use refresh::{RefreshRequest, refresh};
pub use register::{RegisterRequest, TokenPairResponse, register};
