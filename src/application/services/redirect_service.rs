//! Redirect resolution with usage counting.

use std::sync::Arc;

use crate::domain::repositories::ShortenUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Resolves a short code to its original URL, counting the hit.
pub struct RedirectService<R: ShortenUrlRepository> {
    repository: Arc<R>,
}

impl<R: ShortenUrlRepository> RedirectService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the original URL for `code` and increments its counter once.
    ///
    /// Codes that cannot have been generated are rejected without touching
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed or unknown.
    /// Returns [`AppError::Database`] on database errors.
    pub async fn redirect(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::NotFound);
        }

        let record = self
            .repository
            .increment_request_count(code)
            .await?
            .ok_or(AppError::NotFound)?;

        metrics::counter!("shorten_url_redirects_total").increment(1);
        tracing::debug!(code = %code, request_count = record.request_count, "Redirecting");

        Ok(record.original_url)
    }
}
