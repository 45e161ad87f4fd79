//! Public read endpoints.

use axum::extract::{Path, State};
use axum::Json;
use domains::{Post, PostId};

use crate::error::ApiError;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

/// Ids that don't parse as integers are reported as missing posts.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = id.parse()?;
    Ok(Json(state.posts.get(id).await?))
}
