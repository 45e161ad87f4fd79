//! Admin-gated endpoints. Authorization happens in the [`AdminRequest`]
//! extractor before any of these bodies run.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domains::{Post, PostId, PostInput};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::{AdminRequest, NoFields};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    success: bool,
    message: &'static str,
    is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn login(request: AdminRequest<NoFields>) -> Json<LoginResponse> {
    Json(LoginResponse {
        success: true,
        message: "Admin authenticated successfully",
        is_admin: request.grant.is_admin(),
    })
}

pub async fn create_post(
    State(state): State<AppState>,
    request: AdminRequest<PostInput>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.posts.create(request.body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: AdminRequest<PostInput>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = id.parse()?;
    Ok(Json(state.posts.update(id, request.body).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _request: AdminRequest<NoFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: PostId = id.parse()?;
    state.posts.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully",
    }))
}
