//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_http_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (absolute, `http` or `https`).
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,
}

/// Response carrying the externally visible short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shorten_url: String,
}
