//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Returns **307 Temporary Redirect** with `Location` set to the original
/// URL.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is not a valid identifier.
/// Returns 404 Not Found if the code is unknown or was removed.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.store.read_url(&code).await?;
    Ok(Redirect::temporary(&original_url))
}
