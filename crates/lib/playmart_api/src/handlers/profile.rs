//! Profile request handlers.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ProfileResponse;
use crate::services::profile;

/// `GET /users/me`: profile of the authenticated user.
pub async fn my_profile_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<ProfileResponse>> {
    let user_id = user
        .0
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".into()))?;
    let resp = profile::get_profile(&state.auth, user_id).await?;
    Ok(Json(resp))
}

/// `GET /users/{id}`: profile of any user.
pub async fn user_profile_handler(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ProfileResponse>> {
    let Path(user_id) = user_id?;
    let resp = profile::get_profile(&state.auth, user_id).await?;
    Ok(Json(resp))
}
