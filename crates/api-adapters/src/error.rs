//! # API Errors
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Messages are
//! fixed per kind; internal detail stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::AppError;
use serde::Serialize;
use thiserror::Error;

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const ROUTE_NOT_FOUND: &str = "Route not found";
pub const INVALID_BODY: &str = "Invalid request body";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    /// Body that is neither valid JSON nor a valid form.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("request body exceeds the configured limit")]
    BodyTooLarge,

    #[error("no route for this path")]
    RouteNotFound,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::App(app) => match app {
                AppError::NotFound(..) => StatusCode::NOT_FOUND,
                AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AppError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            },
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }

    /// The message callers see.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::App(app) => match app {
                AppError::NotFound(entity, _) => format!("{entity} not found"),
                AppError::ValidationError(msg) => msg.clone(),
                AppError::Unauthorized(_) => services::admin_gate::INVALID_CREDENTIALS.to_string(),
                AppError::Internal(_) => INTERNAL_ERROR.to_string(),
                AppError::RateLimitExceeded(_) => TOO_MANY_REQUESTS.to_string(),
            },
            ApiError::MalformedBody(_) => INVALID_BODY.to_string(),
            ApiError::BodyTooLarge => BODY_TOO_LARGE.to_string(),
            ApiError::RouteNotFound => ROUTE_NOT_FOUND.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::MalformedBody(reason) = &self {
            tracing::debug!(%reason, "rejected request body");
        }
        let body = Json(ErrorBody {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}
