//! Authenticated API routes proxying the community backend.
//!
//! Every handler extracts [`RequireAuth`](crate::auth::RequireAuth), pulls
//! the caller's access token from the session, and forwards the request to
//! the backend with `Authorization: Bearer`. Nothing is cached or stored
//! here.

pub mod categories;
pub mod groups;
pub mod posts;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::auth::AppState;
use crate::calendar;

/// Builds the `/api` route tree.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(users::me))
        .route("/api/me/profile", put(users::update_profile))
        .route("/api/users/{id}", get(users::get_profile))
        .route("/api/posts", get(posts::list).post(posts::create))
        .route(
            "/api/posts/{id}",
            get(posts::get).put(posts::update).delete(posts::remove),
        )
        .route(
            "/api/posts/{id}/like",
            post(posts::like).delete(posts::unlike),
        )
        .route(
            "/api/posts/{id}/comments",
            get(posts::list_comments).post(posts::create_comment),
        )
        .route("/api/comments/{id}", delete(posts::remove_comment))
        .route("/api/categories", get(categories::list))
        .route("/api/groups", get(groups::list))
        .route("/api/groups/{id}", get(groups::get))
        .route("/api/groups/{id}/join", post(groups::join))
        .route("/api/groups/{id}/leave", post(groups::leave))
        .route("/api/groups/{id}/members", get(groups::members))
        .route("/api/calendar", get(calendar::calendar))
}
