//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extractors::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;

/// Creates a short link for an original URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://www.json.org" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shorten_url": "http://localhost:5001/s/3tQ3Ta" }
/// ```
///
/// The origin is the configured `BASE_URL`, or the request's own origin when
/// none is configured.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a JSON object with an absolute
/// http(s) `url`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let origin = match state.base_url.as_deref() {
        Some(base_url) => base_url.to_string(),
        None => request_origin(&headers, &uri)?,
    };

    let record = state.shorten_service.shorten(payload.url.trim()).await?;

    let shorten_url = format!(
        "{}{}",
        origin.trim_end_matches('/'),
        record.redirect_path()
    );
    tracing::info!("Shorten URL \"{}\" is created", shorten_url);

    Ok((StatusCode::CREATED, Json(ShortenResponse { shorten_url })))
}
