//! In-memory credential store.
//!
//! Ids are assigned sequentially from 1. Uniqueness is checked under the
//! write lock, so concurrent inserts of the same identity cannot both win.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Result, StoreError, UserStore};
use crate::models::auth::{IdentityField, NewUser, User, UserId};
use crate::models::profile::{UserIntroduction, UserRights, UserWallet};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    introductions: HashMap<UserId, UserIntroduction>,
    rights: HashMap<UserId, UserRights>,
    wallets: HashMap<UserId, UserWallet>,
    last_id: UserId,
}

impl Tables {
    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.values().find(|u| pred(u)).cloned()
    }

    /// First colliding field, checked account, then username, then email.
    fn conflict(&self, user: &NewUser) -> Option<IdentityField> {
        let users = || self.users.values();
        if users().any(|u| u.account == user.account) {
            Some(IdentityField::Account)
        } else if users().any(|u| u.username == user.username) {
            Some(IdentityField::Username)
        } else if users().any(|u| u.email == user.email) {
            Some(IdentityField::Email)
        } else {
            None
        }
    }
}

/// Credential store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Provision (or replace) a user's permission flags.
    pub async fn set_rights(&self, rights: UserRights) {
        self.tables.write().await.rights.insert(rights.user_id, rights);
    }

    /// Provision (or replace) a user's wallet.
    pub async fn set_wallet(&self, wallet: UserWallet) {
        self.tables.write().await.wallets.insert(wallet.user_id, wallet);
    }

    /// Soft-disable a user. Returns `false` if the user does not exist.
    pub async fn disable(&self, id: UserId, at: DateTime<Utc>) -> bool {
        match self.tables.write().await.users.get_mut(&id) {
            Some(user) => {
                user.disabled_at = Some(at);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_account(&self, account: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.find(|u| u.account == account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.find(|u| u.email == email))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn exists_by_account(&self, account: &str) -> Result<bool> {
        Ok(self.find_by_account(account).await?.is_some())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId> {
        let mut tables = self.tables.write().await;
        if let Some(field) = tables.conflict(&user) {
            return Err(StoreError::Conflict(field));
        }

        tables.last_id += 1;
        let id = tables.last_id;

        if let Some(intro) = user.introduction {
            tables.introductions.insert(
                id,
                UserIntroduction {
                    user_id: id,
                    nickname: intro.nickname,
                    gender: intro.gender,
                    phone: intro.phone,
                    address: intro.address,
                    date_of_birth: intro.date_of_birth,
                    bio: intro.bio,
                },
            );
        }

        tables.users.insert(
            id,
            User {
                id,
                account: user.account,
                username: user.username,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
                last_login_at: None,
                disabled_at: None,
            },
        );
        Ok(id)
    }

    async fn find_introduction(&self, id: UserId) -> Result<Option<UserIntroduction>> {
        Ok(self.tables.read().await.introductions.get(&id).cloned())
    }

    async fn find_rights(&self, id: UserId) -> Result<Option<UserRights>> {
        Ok(self.tables.read().await.rights.get(&id).copied())
    }

    async fn find_wallet(&self, id: UserId) -> Result<Option<UserWallet>> {
        Ok(self.tables.read().await.wallets.get(&id).copied())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(account: &str, username: &str, email: &str) -> NewUser {
        NewUser {
            account: account.into(),
            username: username.into(),
            email: email.into(),
            password_hash: "digest".into(),
            introduction: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = InMemoryUserStore::new();
        let a = store.insert(new_user("a", "a", "a@x.io")).await.unwrap();
        let b = store.insert(new_user("b", "b", "b@x.io")).await.unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn insert_rejects_each_duplicate_field() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a", "a", "a@x.io")).await.unwrap();

        let cases = [
            (new_user("a", "z", "z@x.io"), IdentityField::Account),
            (new_user("z", "a", "z@x.io"), IdentityField::Username),
            (new_user("z", "z", "a@x.io"), IdentityField::Email),
        ];
        for (user, expected) in cases {
            match store.insert(user).await {
                Err(StoreError::Conflict(field)) => assert_eq!(field, expected),
                other => panic!("expected conflict on {expected}, got {other:?}"),
            }
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn account_conflict_wins_over_earlier_username_match() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("a", "shared", "a@x.io")).await.unwrap();
        store.insert(new_user("taken", "b", "b@x.io")).await.unwrap();

        match store.insert(new_user("taken", "shared", "c@x.io")).await {
            Err(StoreError::Conflict(field)) => assert_eq!(field, IdentityField::Account),
            other => panic!("expected account conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn user_records_absent_for_unknown_id() {
        let store = InMemoryUserStore::new();
        assert!(store.find_user_records(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_records_collect_provisioned_rows() {
        let store = InMemoryUserStore::new();
        let id = store.insert(new_user("a", "a", "a@x.io")).await.unwrap();
        store
            .set_wallet(UserWallet {
                user_id: id,
                points: 40,
            })
            .await;

        let records = store.find_user_records(id).await.unwrap().unwrap();
        assert_eq!(records.user.account, "a");
        assert!(records.introduction.is_none());
        assert!(records.rights.is_none());
        assert_eq!(records.wallet.map(|w| w.points), Some(40));
    }

    #[tokio::test]
    async fn record_login_and_disable_update_user() {
        let store = InMemoryUserStore::new();
        let id = store.insert(new_user("a", "a", "a@x.io")).await.unwrap();
        let now = Utc::now();

        store.record_login(id, now).await.unwrap();
        assert!(store.disable(id, now).await);
        assert!(!store.disable(42, now).await);

        let user = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.last_login_at, Some(now));
        assert!(user.is_disabled());
    }
}
