//! Read-only statistics for short codes.

use std::sync::Arc;

use crate::domain::entities::ShortenUrl;
use crate::domain::repositories::{ShortenUrlRepository, StoreSummary};
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;

/// Service exposing records and usage counters without mutating them.
pub struct StatsService<R: ShortenUrlRepository> {
    repository: Arc<R>,
}

impl<R: ShortenUrlRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the full record for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is malformed or unknown.
    /// Returns [`AppError::Database`] on database errors.
    pub async fn get_stats(&self, code: &str) -> Result<ShortenUrl, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::NotFound);
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Returns record count and total redirects across the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    pub async fn summary(&self) -> Result<StoreSummary, AppError> {
        self.repository.summary().await
    }
}
