//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{Result, StoreError, UserStore};
use crate::models::auth::{IdentityField, NewUser, User, UserId};
use crate::models::profile::{UserIntroduction, UserRights, UserWallet};

const USER_COLUMNS: &str =
    "id, account, username, email, password_hash, created_at, last_login_at, disabled_at";

/// Credential store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {column} = $1)");
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

/// Map an insert failure to a conflict when a uniqueness constraint fired.
fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
        && let Some(field) = db.constraint().and_then(conflict_field)
    {
        return StoreError::Conflict(field);
    }
    StoreError::Db(e)
}

/// Constraint names come from the accounts migration.
fn conflict_field(constraint: &str) -> Option<IdentityField> {
    match constraint {
        "users_account_key" => Some(IdentityField::Account),
        "users_username_key" => Some(IdentityField::Username),
        "users_email_key" => Some(IdentityField::Email),
        _ => None,
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_account(&self, account: &str) -> Result<Option<User>> {
        self.find_one("account", account).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one("email", email).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists_by_account(&self, account: &str) -> Result<bool> {
        self.exists("account", account).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        self.exists("username", username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        self.exists("email", email).await
    }

    async fn insert(&self, user: NewUser) -> Result<UserId> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (account, username, email, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&user.account)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        if let Some(intro) = &user.introduction {
            sqlx::query(
                "INSERT INTO user_introductions \
                 (user_id, nickname, gender, phone, address, date_of_birth, bio) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(id)
            .bind(&intro.nickname)
            .bind(&intro.gender)
            .bind(&intro.phone)
            .bind(&intro.address)
            .bind(intro.date_of_birth)
            .bind(&intro.bio)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn find_introduction(&self, id: UserId) -> Result<Option<UserIntroduction>> {
        let row = sqlx::query_as::<_, UserIntroduction>(
            "SELECT user_id, nickname, gender, phone, address, date_of_birth, bio \
             FROM user_introductions WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_rights(&self, id: UserId) -> Result<Option<UserRights>> {
        let row = sqlx::query_as::<_, UserRights>(
            "SELECT user_id, is_active, can_shop, can_message, can_sell \
             FROM user_rights WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_wallet(&self, id: UserId) -> Result<Option<UserWallet>> {
        let row = sqlx::query_as::<_, UserWallet>(
            "SELECT user_id, points FROM user_wallets WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
