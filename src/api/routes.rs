//! API route configuration.
//!
//! Mounted under `/api`; every route sees the caller's
//! [`crate::api::middleware::auth::Owner`].

use crate::api::handlers::{
    delete_user_urls_handler, list_user_urls_handler, shorten_batch_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Shorten one URL
/// - `POST   /shorten/batch`  - Shorten several URLs atomically
/// - `GET    /user/urls`      - List the caller's links
/// - `DELETE /user/urls`      - Remove the caller's links
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/batch", post(shorten_batch_handler))
        .route(
            "/user/urls",
            get(list_user_urls_handler).delete(delete_user_urls_handler),
        )
}
