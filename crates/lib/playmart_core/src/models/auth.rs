//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API request/response
//! shapes (which use `#[serde(rename_all = "camelCase")]`).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier assigned by the credential store.
pub type UserId = i64;

/// Stored user record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    /// Unique login identifier.
    pub account: String,
    /// Unique display name.
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    /// Set when the account is soft-disabled. Users are never deleted.
    pub disabled_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account has been soft-disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled_at.is_some()
    }
}

/// A user record ready to be persisted, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub account: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub introduction: Option<NewIntroduction>,
}

/// Profile fields captured at registration.
#[derive(Debug, Clone, Default)]
pub struct NewIntroduction {
    pub nickname: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Registration input handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Identity field that must be unique across users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Account,
    Username,
    Email,
}

impl IdentityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Account => "account",
            IdentityField::Username => "username",
            IdentityField::Email => "email",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user ID as a string (standard JWT `sub` claim).
    pub sub: String,
    /// Login account.
    pub account: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

impl TokenClaims {
    /// Parse the subject back into a numeric user ID.
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// Successful login result.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user_id: UserId,
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}
