//! Forum post, like, and comment routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use campus_hub_backend_api::{Comment, NewComment, NewPost, Page, Post, PostUpdate};
use campus_hub_core::{CategoryId, CommentId, PostId};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{AppState, RequireAuth};
use crate::error::ApiError;

/// Query parameters for listing posts.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    /// Restrict to one category.
    pub category: Option<CategoryId>,
    /// One-based page number.
    pub page: Option<u32>,
}

/// `GET /api/posts`
pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Page<Post>>, ApiError> {
    let page = state
        .backend
        .list_posts(user.access_token(), query.category, query.page)
        .await?;
    Ok(Json(page))
}

/// `POST /api/posts`
pub async fn create(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Json(new_post): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    if new_post.title.trim().is_empty() {
        return Err(ApiError::InvalidRequest("title must not be empty".to_string()));
    }

    let post = state
        .backend
        .create_post(user.access_token(), &new_post)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /api/posts/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
) -> Result<Json<Post>, ApiError> {
    let post = state.backend.get_post(user.access_token(), id).await?;
    Ok(Json(post))
}

/// `PUT /api/posts/{id}`
pub async fn update(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
    Json(update): Json<PostUpdate>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .backend
        .update_post(user.access_token(), id, &update)
        .await?;
    Ok(Json(post))
}

/// `DELETE /api/posts/{id}`
pub async fn remove(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    state.backend.delete_post(user.access_token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/posts/{id}/like`
pub async fn like(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    state.backend.like_post(user.access_token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/posts/{id}/like`
pub async fn unlike(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
) -> Result<StatusCode, ApiError> {
    state.backend.unlike_post(user.access_token(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/posts/{id}/comments`
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .backend
        .list_comments(user.access_token(), id)
        .await?;
    Ok(Json(comments))
}

/// `POST /api/posts/{id}/comments`
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<PostId>,
    Json(new_comment): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if new_comment.body.trim().is_empty() {
        return Err(ApiError::InvalidRequest("comment must not be empty".to_string()));
    }

    let comment = state
        .backend
        .create_comment(user.access_token(), id, &new_comment)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `DELETE /api/comments/{id}`
pub async fn remove_comment(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<CommentId>,
) -> Result<StatusCode, ApiError> {
    state
        .backend
        .delete_comment(user.access_token(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
