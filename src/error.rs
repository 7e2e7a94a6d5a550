//! Application error type and its HTTP representation.
//!
//! Every component returns [`AppError`]. The translation to a status code and
//! JSON body happens exactly once, in [`IntoResponse for AppError`](IntoResponse).
//! Internal causes are logged and never written to the response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::code_generator::CODE_SPACE;
use crate::utils::db_error::unique_violation_detail;

/// Body detail for unknown short codes.
pub const NOT_FOUND_DETAIL: &str = "Shorten URL is not found";

/// Body detail for any failure the client is not told about.
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// Body detail when the retry cap on code allocation is reached.
pub const CAPACITY_EXHAUSTED_DETAIL: &str = "Short code space is exhausted";

/// A single structured validation failure.
///
/// Serialized as `{"type": ..., "loc": [...], "msg": ..., "input": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl FieldError {
    pub fn new(kind: impl Into<String>, loc: &[&str], msg: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request input (400).
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The requested code has no record (404).
    #[error("Shorten URL is not found")]
    NotFound,

    /// Insert lost a race on the primary key. Retried by the shortening
    /// service and only reaches the client as a 500 if it escapes.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The configured attempt cap was reached without finding a free code (503).
    #[error("No free short code found after {attempts} attempts")]
    CapacityExhausted { attempts: u32 },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DuplicateKey(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON body sent to the client.
    pub fn detail(&self) -> Value {
        match self {
            AppError::Validation(errors) => json!({ "detail": errors }),
            AppError::NotFound => json!({ "detail": NOT_FOUND_DETAIL }),
            AppError::CapacityExhausted { .. } => json!({ "detail": CAPACITY_EXHAUSTED_DETAIL }),
            AppError::DuplicateKey(_) | AppError::Database(_) | AppError::Internal(_) => {
                json!({ "detail": UNKNOWN_ERROR_DETAIL })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match unique_violation_detail(&e) {
            Some(detail) => AppError::DuplicateKey(detail),
            None => AppError::Database(e),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(crate::utils::validation::field_errors_from(&errors, "body"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::CapacityExhausted { attempts } => {
                tracing::error!(attempts, code_space = CODE_SPACE, "Short code allocation gave up");
            }
            AppError::DuplicateKey(_) | AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Unhandled error");
            }
            AppError::Validation(_) | AppError::NotFound => {}
        }

        (status, Json(self.detail())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CapacityExhausted { attempts: 3 }.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::DuplicateKey("shorten_url.code".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_detail() {
        assert_eq!(
            AppError::NotFound.detail(),
            json!({ "detail": "Shorten URL is not found" })
        );
    }

    #[test]
    fn test_internal_detail_does_not_leak_cause() {
        let detail = AppError::internal("connection refused on 10.0.0.5").detail();
        assert_eq!(detail, json!({ "detail": "Unknown error" }));
    }

    #[test]
    fn test_validation_detail_is_a_list() {
        let error = AppError::Validation(vec![
            FieldError::new("string_pattern_mismatch", &["path", "code"], "bad code")
                .with_input(json!("abc")),
        ]);

        let detail = error.detail();
        let items = detail["detail"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["type"], "string_pattern_mismatch");
        assert_eq!(items[0]["loc"], json!(["path", "code"]));
        assert_eq!(items[0]["input"], "abc");
    }

    #[test]
    fn test_field_error_without_input_omits_key() {
        let value = serde_json::to_value(FieldError::new("missing", &["body", "url"], "x")).unwrap();
        assert!(value.get("input").is_none());
    }

    #[test]
    fn test_row_not_found_maps_to_database_error() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, AppError::Database(_)));
    }
}
