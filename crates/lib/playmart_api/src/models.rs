//! Request and response bodies (camelCase JSON).

use chrono::NaiveDate;
use playmart_core::models::profile::UserProfile;
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    pub db_connected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub account: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account or email.
    #[serde(alias = "email")]
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub account: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
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

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            account: p.account,
            username: p.username,
            email: p.email,
            created_at: p.created_at.to_rfc3339(),
            last_login_at: p.last_login_at.map(|t| t.to_rfc3339()),
            nickname: p.nickname,
            gender: p.gender,
            phone: p.phone,
            address: p.address,
            date_of_birth: p.date_of_birth,
            bio: p.bio,
            is_active: p.is_active,
            can_shop: p.can_shop,
            can_message: p.can_message,
            can_sell: p.can_sell,
            points: p.points,
        }
    }
}
