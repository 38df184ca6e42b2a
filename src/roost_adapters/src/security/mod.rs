pub mod jwt;
pub mod password_hasher;

pub use jwt::{Claims, JwtConfig, JwtTokenIssuer, TokenDecodeError, decode_token};
pub use password_hasher::Argon2PasswordHasher;
