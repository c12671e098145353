//! Handlers for the shortening endpoints.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::batch::{BatchRequestItem, BatchResponseItem};
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::auth::Owner;
use crate::domain::entities::BatchItem;
use crate::domain::error::StoreError;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL sent as a plain-text body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Response Codes
///
/// - **201 Created**: body is the new short link
/// - **409 Conflict**: body is the short link created earlier for the same URL
/// - **400 Bad Request**: body is the validation reason
///
/// ```bash
/// curl -X POST -d "https://example.org/" http://localhost:8080/
/// http://localhost:8080/v
/// ```
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    body: String,
) -> Response {
    match state.store.write_url(body.trim(), owner.as_str()).await {
        Ok(short_url) => (StatusCode::CREATED, short_url).into_response(),
        Err(StoreError::Conflict { short_url }) => (StatusCode::CONFLICT, short_url).into_response(),
        Err(e) => {
            let err = AppError::from(e);
            (err.status(), err.to_string()).into_response()
        }
    }
}

/// Shortens a single URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.org" }
/// ```
///
/// # Response
///
/// ```json
/// { "result": "http://localhost:8080/v" }
/// ```
///
/// Status is **201 Created** for a new record and **409 Conflict** when the
/// caller already shortened the same URL; the body then carries the
/// existing short link.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or the URL is invalid.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;

    match state.store.write_url(&payload.url, owner.as_str()).await {
        Ok(result) => Ok((StatusCode::CREATED, Json(ShortenResponse { result }))),
        Err(StoreError::Conflict { short_url }) => Ok((
            StatusCode::CONFLICT,
            Json(ShortenResponse { result: short_url }),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Shortens several URLs in one atomic call.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [
///   { "correlation_id": "a", "original_url": "https://x.io" },
///   { "correlation_id": "b", "original_url": "https://y.io" }
/// ]
/// ```
///
/// # Response
///
/// **201 Created**, one entry per request entry in the same order:
///
/// ```json
/// [
///   { "correlation_id": "a", "short_url": "http://localhost:8080/v" },
///   { "correlation_id": "b", "short_url": "http://localhost:8080/w" }
/// ]
/// ```
///
/// URLs the caller shortened before resolve to their existing short link.
///
/// # Errors
///
/// Returns 400 Bad Request for an empty batch, a malformed body, or any
/// invalid URL. The error details name the offending entry and nothing is
/// stored.
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    payload: Result<Json<Vec<BatchRequestItem>>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<BatchResponseItem>>), AppError> {
    let Json(payload) = payload?;

    if payload.is_empty() {
        return Err(AppError::bad_request(
            "Batch must contain at least one item",
            serde_json::json!({}),
        ));
    }

    let items: Vec<BatchItem> = payload.into_iter().map(BatchItem::from).collect();
    let results = state.store.batch_write(owner.as_str(), items).await?;

    Ok((
        StatusCode::CREATED,
        Json(results.into_iter().map(BatchResponseItem::from).collect()),
    ))
}
