//! # api-adapters
//!
//! The HTTP surface of the blog API. The axum adapter is compiled in with the
//! `web-axum` feature; the rate limiter core and shared state are framework
//! neutral.

pub mod rate_limit;

#[cfg(feature = "web-axum")]
mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
mod router;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use router::{router, HttpOptions};

use std::sync::Arc;

use rate_limit::{RateLimitPolicy, RateLimiter};
use services::{AdminGate, PostService};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub admin: Arc<AdminGate>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(posts: PostService, admin: AdminGate, rate_limit: RateLimitPolicy) -> Self {
        Self {
            posts: Arc::new(posts),
            admin: Arc::new(admin),
            limiter: Arc::new(RateLimiter::new(rate_limit)),
        }
    }
}
