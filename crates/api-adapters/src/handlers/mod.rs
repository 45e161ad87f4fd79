//! HTTP handlers

pub mod admin;
pub mod health;
pub mod posts;

use crate::error::ApiError;

/// Fallback for any path or method without a handler.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
