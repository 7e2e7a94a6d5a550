//! Handler for short URL redirect.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::extractors::ValidatedPath;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validation::validate_code;

/// Redirects a short code to its original URL and counts the hit.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Response
///
/// `307 Temporary Redirect` with `Location: <original_url>`.
///
/// # Errors
///
/// Returns 400 Bad Request if `code` does not match `^[A-Za-z0-9]{6}$`;
/// the store is not queried.
/// Returns 404 Not Found if the code does not exist.
/// Returns 500 Internal Server Error if the stored URL cannot be sent as a
/// `Location` header.
pub async fn redirect_handler(
    State(state): State<AppState>,
    ValidatedPath(code): ValidatedPath<String>,
) -> Result<Response, AppError> {
    validate_code(&code).map_err(AppError::Validation)?;

    let original_url = state.redirect_service.redirect(&code).await?;

    let location = HeaderValue::from_str(&original_url).map_err(|e| {
        AppError::internal(format!("Stored URL for {code} is not a valid Location: {e}"))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
