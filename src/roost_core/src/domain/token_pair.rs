use chrono::{DateTime, Utc};

/// Freshly signed access/refresh token pair with independent lifetimes.
///
/// Transient: constructed per successful register/login/refresh call and
/// returned once. Only the refresh token's digest outlives the request.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}
