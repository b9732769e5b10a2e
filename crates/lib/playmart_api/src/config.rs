//! API server configuration.

use playmart_core::auth::AuthConfig;
use playmart_core::auth::jwt::resolve_jwt_secret;
use playmart_core::auth::password::BCRYPT_COST_RANGE;
use tracing::warn;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub pg_connection_url: String,
    /// Hashing and signing settings handed to the auth service.
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `BIND_ADDR`             | `127.0.0.1:3100`                     |
    /// | `DATABASE_URL`          | `postgres://localhost:5432/playmart` |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file   |
    /// | `ACCESS_TOKEN_TTL_SECS` | `900` (must be positive)             |
    /// | `BCRYPT_COST`           | `10` (must be within 4..=31)         |
    ///
    /// Out-of-range or malformed values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let mut auth = AuthConfig::new(resolve_jwt_secret());
        if let Ok(raw) = std::env::var("ACCESS_TOKEN_TTL_SECS") {
            match parse_token_ttl(&raw) {
                Some(ttl) => auth.access_token_ttl_secs = ttl,
                None => warn!(value = %raw, "ignoring invalid ACCESS_TOKEN_TTL_SECS"),
            }
        }
        if let Ok(raw) = std::env::var("BCRYPT_COST") {
            match parse_bcrypt_cost(&raw) {
                Some(cost) => auth.bcrypt_cost = cost,
                None => warn!(value = %raw, "ignoring invalid BCRYPT_COST"),
            }
        }

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            pg_connection_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/playmart".into()),
            auth,
        }
    }
}

/// Token lifetime in seconds; must be positive.
pub fn parse_token_ttl(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|ttl| *ttl > 0)
}

/// bcrypt cost; must be one bcrypt accepts.
pub fn parse_bcrypt_cost(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|cost| BCRYPT_COST_RANGE.contains(cost))
}
