//! Forum category routes.

use axum::{Json, extract::State};
use campus_hub_backend_api::Category;
use std::sync::Arc;

use crate::auth::{AppState, RequireAuth};
use crate::error::ApiError;

/// `GET /api/categories`
pub async fn list(
    State(state): State<Arc<AppState>>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.backend.list_categories(user.access_token()).await?;
    Ok(Json(categories))
}
