//! Credential store: persistence of users and their optional related records.
//!
//! `UserStore` is the seam between the auth orchestrator and storage. Two
//! implementations ship: [`postgres::PgUserStore`] for deployments and
//! [`memory::InMemoryUserStore`] for tests and local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::auth::{IdentityField, NewUser, User, UserId};
use crate::models::profile::{UserIntroduction, UserRecords, UserRights, UserWallet};

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate {0}")]
    Conflict(IdentityField),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage operations needed by the auth and profile flows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_account(&self, account: &str) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    async fn exists_by_account(&self, account: &str) -> Result<bool>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Persist a new user (and its introduction, if any) atomically.
    ///
    /// Implementations must enforce account/username/email uniqueness at
    /// write time and report a violation as [`StoreError::Conflict`].
    async fn insert(&self, user: NewUser) -> Result<UserId>;

    async fn find_introduction(&self, id: UserId) -> Result<Option<UserIntroduction>>;

    async fn find_rights(&self, id: UserId) -> Result<Option<UserRights>>;

    async fn find_wallet(&self, id: UserId) -> Result<Option<UserWallet>>;

    /// Stamp the user's last-login time.
    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<()>;

    /// Fetch a user with all related records, or `None` if the user is unknown.
    async fn find_user_records(&self, id: UserId) -> Result<Option<UserRecords>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let introduction = self.find_introduction(id).await?;
        let rights = self.find_rights(id).await?;
        let wallet = self.find_wallet(id).await?;
        Ok(Some(UserRecords {
            user,
            introduction,
            rights,
            wallet,
        }))
    }
}
