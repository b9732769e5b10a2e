//! Profile domain models: the optional per-user records and the flattened view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::auth::{User, UserId};

/// Nickname, contact details and bio. At most one per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct UserIntroduction {
    pub user_id: UserId,
    pub nickname: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// Permission flags. At most one per user; all `false` until provisioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRights {
    pub user_id: UserId,
    pub is_active: bool,
    pub can_shop: bool,
    pub can_message: bool,
    pub can_sell: bool,
}

/// Point balance. At most one per user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct UserWallet {
    pub user_id: UserId,
    pub points: i64,
}

/// A user together with whichever related records exist.
#[derive(Debug, Clone)]
pub struct UserRecords {
    pub user: User,
    pub introduction: Option<UserIntroduction>,
    pub rights: Option<UserRights>,
    pub wallet: Option<UserWallet>,
}

/// Flattened profile view. Missing related records fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub account: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub nickname: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub can_shop: bool,
    pub can_message: bool,
    pub can_sell: bool,
    pub points: i64,
}

impl From<UserRecords> for UserProfile {
    fn from(records: UserRecords) -> Self {
        let UserRecords {
            user,
            introduction,
            rights,
            wallet,
        } = records;
        let intro = introduction.unwrap_or_default();
        let rights = rights.unwrap_or_default();
        let points = wallet.map(|w| w.points).unwrap_or(0);

        Self {
            id: user.id,
            account: user.account,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
            nickname: intro.nickname,
            gender: intro.gender,
            phone: intro.phone,
            address: intro.address,
            date_of_birth: intro.date_of_birth,
            bio: intro.bio,
            is_active: rights.is_active,
            can_shop: rights.can_shop,
            can_message: rights.can_message,
            can_sell: rights.can_sell,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            account: "acct".into(),
            username: "name".into(),
            email: "a@example.com".into(),
            password_hash: "digest".into(),
            created_at: Utc::now(),
            last_login_at: None,
            disabled_at: None,
        }
    }

    #[test]
    fn profile_defaults_when_related_records_missing() {
        let profile = UserProfile::from(UserRecords {
            user: user(),
            introduction: None,
            rights: None,
            wallet: None,
        });

        assert_eq!(profile.id, 7);
        assert_eq!(profile.nickname, "");
        assert_eq!(profile.phone, "");
        assert!(profile.bio.is_none());
        assert!(!profile.is_active);
        assert!(!profile.can_shop);
        assert!(!profile.can_message);
        assert!(!profile.can_sell);
        assert_eq!(profile.points, 0);
    }

    #[test]
    fn profile_takes_values_from_related_records() {
        let profile = UserProfile::from(UserRecords {
            user: user(),
            introduction: Some(UserIntroduction {
                user_id: 7,
                nickname: "nick".into(),
                bio: Some("hello".into()),
                ..Default::default()
            }),
            rights: Some(UserRights {
                user_id: 7,
                is_active: true,
                can_sell: true,
                ..Default::default()
            }),
            wallet: Some(UserWallet {
                user_id: 7,
                points: 250,
            }),
        });

        assert_eq!(profile.nickname, "nick");
        assert_eq!(profile.bio.as_deref(), Some("hello"));
        assert!(profile.is_active);
        assert!(profile.can_sell);
        assert!(!profile.can_shop);
        assert_eq!(profile.points, 250);
    }
}
