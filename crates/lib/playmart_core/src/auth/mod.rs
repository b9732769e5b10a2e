//! Authentication and profile logic.
//!
//! Provides password hashing, JWT management, and the [`service::AuthService`]
//! orchestrator shared by the HTTP API and the server binary.

pub mod jwt;
pub mod password;
pub mod service;

use thiserror::Error;

use crate::models::auth::IdentityField;
use crate::store::StoreError;

/// Access token lifetime: 15 minutes.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration collided with an existing account, username, or email.
    #[error("Duplicate {0}")]
    DuplicateIdentity(IdentityField),

    /// Unknown identifier or wrong password. Deliberately unqualified.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DbError(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(field) => AuthError::DuplicateIdentity(field),
            StoreError::Db(e) => AuthError::DbError(e),
        }
    }
}

/// Hashing and signing settings, injected into [`service::AuthService`].
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: i64,
    /// bcrypt cost factor.
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Config with the given secret and default lifetime and cost.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl_secs: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            bcrypt_cost: password::DEFAULT_BCRYPT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflict_becomes_duplicate_identity() {
        let err = AuthError::from(StoreError::Conflict(IdentityField::Email));
        assert!(matches!(
            err,
            AuthError::DuplicateIdentity(IdentityField::Email)
        ));
        assert_eq!(err.to_string(), "Duplicate email");
    }

    #[test]
    fn store_db_error_is_propagated() {
        let err = AuthError::from(StoreError::Db(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AuthError::DbError(sqlx::Error::PoolTimedOut)));
    }

    #[test]
    fn config_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.access_token_ttl_secs, 900);
        assert_eq!(config.bcrypt_cost, 10);
    }
}
