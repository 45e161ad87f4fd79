//! # Admin request extractor
//!
//! Admin routes carry `username`/`password` in the body next to the payload
//! fields, as JSON or as an urlencoded form. [`AdminRequest`] reads the
//! body, runs the admin gate and only then hands the payload to the handler,
//! so an unauthorized request never reaches a service call.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::Form;
use domains::Credentials;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use services::AdminGrant;

use crate::error::ApiError;
use crate::AppState;

/// Payload-free admin body (login, delete).
#[derive(Debug, Default, Deserialize)]
pub struct NoFields {}

/// An authorized admin request with its payload.
pub struct AdminRequest<T> {
    pub grant: AdminGrant,
    pub body: T,
}

/// Wire shape. Not `Debug`: it holds the plaintext password.
#[derive(Deserialize)]
struct AdminPayload<T> {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T: Default> AdminPayload<T> {
    fn empty() -> Self {
        Self {
            username: None,
            password: None,
            body: T::default(),
        }
    }
}

impl<T> FromRequest<AppState> for AdminRequest<T>
where
    T: DeserializeOwned + Default + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let payload = read_payload::<T>(req, state).await?;

        // Missing fields compare as empty strings and simply fail the check.
        let credentials = Credentials::new(
            payload.username.unwrap_or_default(),
            payload.password.unwrap_or_default(),
        );
        let grant = state.admin.authorize(&credentials).await?;

        Ok(Self {
            grant,
            body: payload.body,
        })
    }
}

async fn read_payload<T>(req: Request, state: &AppState) -> Result<AdminPayload<T>, ApiError>
where
    T: DeserializeOwned + Default + Send + 'static,
{
    if is_form(&req) {
        return Form::<AdminPayload<T>>::from_request(req, state)
            .await
            .map(|Form(payload)| payload)
            .map_err(|rejection| body_error(rejection.status(), "form"));
    }

    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| body_error(rejection.status(), "body"))?;

    parse_json(&bytes)
}

/// Serde messages quote the offending value, which may be the password, so
/// only the error category and position are kept.
fn parse_json<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<AdminPayload<T>, ApiError> {
    // A DELETE without a body is a request without credentials, not a parse error.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(AdminPayload::empty());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        ApiError::MalformedBody(format!(
            "json {:?} error at line {} column {}",
            e.classify(),
            e.line(),
            e.column()
        ))
    })
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn body_error(status: StatusCode, source: &str) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge
    } else {
        ApiError::MalformedBody(format!("unreadable {source} ({status})"))
    }
}
