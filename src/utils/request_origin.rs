//! Public origin of the service derived from the incoming request.

use axum::http::{HeaderMap, Uri, header};

use crate::error::{AppError, FieldError};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds `scheme://host[:port]` for the current request.
///
/// The host (including any port) comes from the `Host` header, or from the
/// request URI authority when there is none (HTTP/2 carries it in
/// `:authority`). The scheme is taken from `X-Forwarded-Proto` when a proxy
/// sets it, then from the URI, otherwise `http`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if neither the `Host` header nor the URI
/// name a host, or the header is not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:5001".parse().unwrap());
///
/// let uri = Uri::from_static("/api/v1/shorten");
/// assert_eq!(request_origin(&headers, &uri).unwrap(), "http://localhost:5001");
/// ```
pub fn request_origin(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| host_error("string_type", "Invalid Host header"))?
            .trim(),
        None => uri.authority().map(|a| a.as_str()).unwrap_or_default(),
    };

    if host.is_empty() {
        return Err(host_error("missing", "Missing Host header"));
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .or_else(|| uri.scheme_str())
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{scheme}://{host}"))
}

fn host_error(kind: &str, message: &str) -> AppError {
    AppError::Validation(vec![FieldError::new(kind, &["header", "host"], message)])
}
