//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`            - Shorten a plain-text URL
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /ping`        - Storage health check
//! - `GET  /user/urls`   - Alias of `GET /api/user/urls`
//! - `/api/*`            - JSON API
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Path normalization** - Trailing slash handling
//! - **Panic recovery** - A panicking handler yields 500
//! - **Tracing** - Structured request/response logging
//! - **Compression** - gzip request bodies accepted, responses compressed on request
//! - **Owner cookie** - Signed `uid` cookie resolved into an owner id

use crate::api;
use crate::api::handlers::{
    list_user_urls_handler, ping_handler, redirect_handler, shorten_text_handler,
};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(shorten_text_handler))
        .route("/ping", get(ping_handler))
        .route("/user/urls", get(list_user_urls_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
        .layer(RequestDecompressionLayer::new())
        .layer(CompressionLayer::new())
        .layer(tracing::layer())
        .layer(CatchPanicLayer::new())
}
