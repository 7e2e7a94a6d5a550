//! Request extractors that report failures as [`AppError::Validation`].

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, FieldError};
use crate::utils::validation::body_error;

/// JSON body that is deserialized and then checked with [`Validate`].
///
/// Malformed JSON, a wrong content type, and rule violations all become a
/// `400 {"detail": [...]}` response instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;

        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let kind = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "content_type",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::JsonDataError(_) => "model_type",
        _ => "body_unreadable",
    };

    AppError::Validation(body_error(kind, rejection.body_text()))
}

/// Path parameters whose extraction failures become
/// `400 {"detail": [...]}` located under `["path", <param>]`.
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection_to_error)?;

        Ok(Self(value))
    }
}

fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    let (kind, key) = match &rejection {
        PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } => ("string_unicode", Some(key.as_str())),
            ErrorKind::ParseErrorAtKey { key, .. } => ("string_type", Some(key.as_str())),
            _ => ("value_error", None),
        },
        _ => ("missing", None),
    };

    let loc: Vec<&str> = std::iter::once("path").chain(key).collect();
    AppError::Validation(vec![FieldError::new(kind, &loc, rejection.body_text())])
}
