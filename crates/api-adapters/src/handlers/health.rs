use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use domains::StorageMode;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    storage: StorageMode,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        storage: state.posts.storage_mode(),
    })
}
