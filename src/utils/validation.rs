//! Request validation, independent of the HTTP framework.
//!
//! Handlers call these functions and wrap the resulting [`FieldError`] list
//! in [`AppError::Validation`](crate::error::AppError::Validation).

use std::borrow::Cow;
use std::sync::LazyLock;

use axum::http::HeaderValue;
use regex::Regex;
use serde_json::json;
use url::Url;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::FieldError;
use crate::utils::code_generator::CODE_PATTERN;

/// Compiled pattern for short codes in request paths.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(CODE_PATTERN).unwrap());

/// Checks a short code taken from the request path.
///
/// # Errors
///
/// Returns a single `string_pattern_mismatch` error located at `["path", "code"]`
/// if the code does not match [`CODE_PATTERN`].
pub fn validate_code(code: &str) -> Result<(), Vec<FieldError>> {
    if CODE_REGEX.is_match(code) {
        return Ok(());
    }

    Err(vec![
        FieldError::new(
            "string_pattern_mismatch",
            &["path", "code"],
            format!("String should match pattern '{CODE_PATTERN}'"),
        )
        .with_input(json!(code)),
    ])
}

/// `validator` custom rule: absolute `http`/`https` URL with a host.
///
/// # Errors
///
/// - `url_parsing` if the value is not an absolute URL, or holds characters
///   that cannot be sent back in a `Location` header
/// - `url_scheme` if the scheme is anything but `http` or `https`
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    // Stored verbatim and replayed as the redirect target.
    if HeaderValue::from_str(value.trim()).is_err() {
        return Err(url_error(
            value,
            "url_parsing",
            "Input should be a valid URL, invalid characters",
        ));
    }

    let url = Url::parse(value)
        .map_err(|_| url_error(value, "url_parsing", "Input should be a valid URL"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(url_error(
            value,
            "url_scheme",
            "URL scheme should be 'http' or 'https'",
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(url_error(
            value,
            "url_parsing",
            "Input should be a valid URL, empty host",
        ));
    }

    Ok(())
}

fn url_error(value: &str, code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code).with_message(Cow::Borrowed(message));
    error.add_param(Cow::Borrowed("value"), &value);
    error
}

/// Flattens `validator` errors into a list located under `root`
/// (e.g. `["body", "url"]`), ordered by location.
pub fn field_errors_from(errors: &ValidationErrors, root: &str) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, &mut vec![root.to_string()], &mut out);
    out.sort_by(|a, b| a.loc.cmp(&b.loc));
    out
}

fn collect(errors: &ValidationErrors, path: &mut Vec<String>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        path.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| to_field_error(e, path)));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    path.push(index.to_string());
                    collect(nested, path, out);
                    path.pop();
                }
            }
        }
        path.pop();
    }
}

fn to_field_error(error: &ValidationError, path: &[String]) -> FieldError {
    FieldError {
        kind: error.code.to_string(),
        loc: path.to_vec(),
        msg: error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string()),
        input: error.params.get("value").cloned().filter(|v| !v.is_null()),
    }
}

/// Converts a body deserialization failure into a structured error.
pub fn body_error(kind: &str, message: impl Into<String>) -> Vec<FieldError> {
    vec![FieldError::new(kind, &["body"], message)]
}
