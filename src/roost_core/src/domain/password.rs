use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validated plaintext password. Only ever leaves this type as bytes fed
/// into the password hasher.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort);
        }
        Ok(Password(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
