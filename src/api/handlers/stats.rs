//! Handler for short code statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::api::extractors::ValidatedPath;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validation::validate_code;

/// Returns the record and usage counter for a short code.
///
/// # Endpoint
///
/// `GET /api/v1/stats/{code}`
///
/// Reading statistics never changes `request_count`.
///
/// # Response
///
/// ```json
/// {
///   "code": "3tQ3Ta",
///   "original_url": "https://www.json.org",
///   "request_count": 10,
///   "creation_timestamp": "2025-08-16T14:03:49.425298"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `code` is malformed.
/// Returns 404 Not Found if the code does not exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    ValidatedPath(code): ValidatedPath<String>,
) -> Result<Json<StatsResponse>, AppError> {
    validate_code(&code).map_err(AppError::Validation)?;

    let record = state.stats_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::from(record)))
}
