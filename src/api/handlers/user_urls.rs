//! Handlers for owner-scoped listing and removal.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::user_urls::UserUrl;
use crate::api::middleware::auth::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every live link created by the caller.
///
/// # Endpoint
///
/// `GET /api/user/urls` (also served at `GET /user/urls`)
///
/// # Response
///
/// **200 OK** with the links, or **204 No Content** if the caller has none.
///
/// ```json
/// [
///   { "short_url": "http://localhost:8080/v", "original_url": "https://example.org" }
/// ]
/// ```
pub async fn list_user_urls_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
) -> Result<Response, AppError> {
    let urls = state.store.list_by_owner(owner.as_str()).await?;

    if urls.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<UserUrl> = urls.into_iter().map(UserUrl::from).collect();
    Ok(Json(body).into_response())
}

/// Removes links created by the caller.
///
/// # Endpoint
///
/// `DELETE /api/user/urls`
///
/// # Request Body
///
/// ```json
/// ["v", "w"]
/// ```
///
/// Returns **202 Accepted**. Codes that are invalid, unknown, owned by
/// someone else, or already removed are ignored.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a JSON array of strings.
pub async fn delete_user_urls_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(codes) = payload?;

    state.store.batch_remove(owner.as_str(), codes).await?;

    Ok(StatusCode::ACCEPTED)
}
