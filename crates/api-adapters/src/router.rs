use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{middleware as axum_middleware, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{admin, health, posts, route_not_found};
use crate::middleware;
use crate::AppState;

/// Transport-level knobs that don't belong to the application state.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            body_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Builds the full application: `/api` routes plus JSON fallbacks.
pub fn router(state: AppState, options: &HttpOptions) -> Router {
    let api = Router::new()
        .route("/posts", get(posts::list).fallback(route_not_found))
        .route("/posts/{id}", get(posts::get).fallback(route_not_found))
        .route("/admin/login", post(admin::login).fallback(route_not_found))
        .route(
            "/admin/posts",
            post(admin::create_post).fallback(route_not_found),
        )
        .route(
            "/admin/posts/{id}",
            put(admin::update_post)
                .delete(admin::delete_post)
                .fallback(route_not_found),
        )
        .route("/health", get(health::health).fallback(route_not_found))
        .fallback(route_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ));

    let mut app = Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(options.body_limit_bytes));

    for header in middleware::security_headers() {
        app = app.layer(header);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(middleware::panic_response))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::cors_layer(&options.allowed_origins)),
    )
    .with_state(state)
}
