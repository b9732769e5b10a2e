//! Profile service.

use playmart_core::auth::service::AuthService;
use playmart_core::models::auth::UserId;

use crate::error::{AppError, AppResult};
use crate::models::ProfileResponse;

/// Aggregated profile for `user_id`; a missing user becomes `NotFound`.
pub async fn get_profile(auth: &AuthService, user_id: UserId) -> AppResult<ProfileResponse> {
    auth.get_user_profile(user_id)
        .await?
        .map(ProfileResponse::from)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}
