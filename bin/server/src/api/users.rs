//! Current-user and profile routes.

use axum::{
    Json,
    extract::{Path, State},
};
use campus_hub_backend_api::{ProfileUpdate, UserProfile};
use campus_hub_core::UserId;
use std::sync::Arc;

use crate::auth::{AppState, RequireAuth};
use crate::error::ApiError;
use crate::types::{AccountInfo, MeResponse};

/// `GET /api/me`
///
/// Combines the identity-provider account with the backend profile, so the
/// client gets both in one round trip after login.
pub async fn me(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MeResponse>, ApiError> {
    let profile = state.backend.current_profile(user.access_token()).await?;

    let account = user.account();
    Ok(Json(MeResponse {
        account: AccountInfo {
            username: account.username().map(str::to_string),
            display_name: account.display_name().map(str::to_string),
            email: account.email().map(str::to_string),
        },
        profile,
    }))
}

/// `PUT /api/me/profile`
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state
        .backend
        .update_profile(user.access_token(), &update)
        .await?;
    Ok(Json(profile))
}

/// `GET /api/users/{id}`
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<UserId>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.backend.get_profile(user.access_token(), id).await?;
    Ok(Json(profile))
}
