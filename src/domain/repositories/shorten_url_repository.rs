//! Repository trait for the code to URL mapping store.

use crate::domain::entities::{NewShortenUrl, ShortenUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregate figures over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub records: i64,
    pub total_requests: i64,
}

/// Durable store of [`ShortenUrl`] records keyed by `code`.
///
/// Every mutating operation runs in its own transaction and either commits
/// fully or leaves the store untouched.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteShortenUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenUrlRepository: Send + Sync {
    /// Returns true if a record with `code` exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a new record with `request_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateKey`] if `code` is already present. The
    /// existing record is left unchanged.
    async fn insert(&self, new_record: NewShortenUrl) -> Result<ShortenUrl, AppError>;

    /// Fetches a record without touching its counter.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortenUrl))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenUrl>, AppError>;

    /// Atomically increments `request_count` and returns the updated record.
    ///
    /// Concurrent calls for the same code never lose an update.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortenUrl))` with the incremented counter
    /// - `Ok(None)` if no record has `code`
    async fn increment_request_count(&self, code: &str) -> Result<Option<ShortenUrl>, AppError>;

    /// Counts records and sums their counters.
    async fn summary(&self) -> Result<StoreSummary, AppError>;
}
