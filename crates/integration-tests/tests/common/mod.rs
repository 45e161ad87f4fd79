//! Shared harness: an in-process router over the in-memory store, driven
//! with `tower::ServiceExt::oneshot`.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use api_adapters::rate_limit::RateLimitPolicy;
use api_adapters::{router, AppState, HttpOptions};
use auth_adapters::SharedSecretVerifier;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use domains::PostRepository;
use secrecy::SecretString;
use serde_json::{json, Value};
use services::{AdminGate, PostService};
use storage_adapters::InMemoryPostRepository;
use tower::ServiceExt;

pub const ADMIN_USER: &str = "website-admin";
pub const ADMIN_PASS: &str = "website-admin";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    /// Store seeded with the three sample articles.
    pub fn seeded() -> Self {
        Self::with(Arc::new(InMemoryPostRepository::seeded()), 10_000, None)
    }

    pub fn empty() -> Self {
        Self::over(Arc::new(InMemoryPostRepository::new()))
    }

    /// Any repository, e.g. a mock that fails or panics.
    pub fn over(repo: Arc<dyn PostRepository>) -> Self {
        Self::with(repo, 10_000, None)
    }

    pub fn with_rate_limit(max_requests: u32) -> Self {
        Self::with(Arc::new(InMemoryPostRepository::new()), max_requests, None)
    }

    pub fn with_body_limit(bytes: usize) -> Self {
        Self::with(Arc::new(InMemoryPostRepository::new()), 10_000, Some(bytes))
    }

    fn with(repo: Arc<dyn PostRepository>, max_requests: u32, body_limit: Option<usize>) -> Self {
        let verifier = SharedSecretVerifier::new(ADMIN_USER, SecretString::from(ADMIN_PASS));
        let state = AppState::new(
            PostService::new(repo),
            AdminGate::new(Arc::new(verifier)),
            RateLimitPolicy {
                max_requests,
                window: Duration::from_secs(900),
            },
        );
        let mut options = HttpOptions {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
            ..HttpOptions::default()
        };
        if let Some(bytes) = body_limit {
            options.body_limit_bytes = bytes;
        }
        Self {
            router: router(state, &options),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is JSON")
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        self.send(json_request(method, uri, body)).await
    }

    /// Sends `fields` with valid admin credentials merged in.
    pub async fn admin(&self, method: Method, uri: &str, fields: Value) -> TestResponse {
        self.json(method, uri, &with_credentials(fields)).await
    }

    pub async fn create(&self, fields: Value) -> Value {
        let response = self.admin(Method::POST, "/api/admin/posts", fields).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body
    }
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn with_credentials(mut fields: Value) -> Value {
    if let Value::Object(map) = &mut fields {
        map.insert("username".into(), json!(ADMIN_USER));
        map.insert("password".into(), json!(ADMIN_PASS));
    }
    fields
}

pub fn article(title: &str) -> Value {
    json!({
        "title": title,
        "content": "<p>Body</p>",
    })
}
