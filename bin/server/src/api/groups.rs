//! Student-group membership routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campus_hub_backend_api::{Group, GroupMember};
use campus_hub_core::GroupId;
use std::sync::Arc;

use crate::auth::{AppState, RequireAuth};
use crate::error::ApiError;

/// `GET /api/groups`
pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = state.backend.list_groups(user.access_token()).await?;
    Ok(Json(groups))
}

/// `GET /api/groups/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<GroupId>,
) -> Result<Json<Group>, ApiError> {
    let group = state.backend.get_group(user.access_token(), id).await?;
    Ok(Json(group))
}

/// `POST /api/groups/{id}/join`
pub async fn join(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<GroupId>,
) -> Result<StatusCode, ApiError> {
    state.backend.join_group(user.access_token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/groups/{id}/leave`
pub async fn leave(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<GroupId>,
) -> Result<StatusCode, ApiError> {
    state.backend.leave_group(user.access_token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/groups/{id}/members`
pub async fn members(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<GroupId>,
) -> Result<Json<Vec<GroupMember>>, ApiError> {
    let members = state
        .backend
        .list_group_members(user.access_token(), id)
        .await?;
    Ok(Json(members))
}
