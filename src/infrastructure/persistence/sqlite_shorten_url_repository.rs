//! SQLite implementation of the shorten URL repository.

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::shorten_url::{format_timestamp, parse_timestamp};
use crate::domain::entities::{NewShortenUrl, ShortenUrl};
use crate::domain::repositories::{ShortenUrlRepository, StoreSummary};
use crate::error::AppError;

/// Raw row as stored in `shorten_url`.
#[derive(Debug, FromRow)]
struct ShortenUrlRow {
    code: String,
    original_url: String,
    request_count: i64,
    creation_timestamp: String,
}

impl TryFrom<ShortenUrlRow> for ShortenUrl {
    type Error = AppError;

    fn try_from(row: ShortenUrlRow) -> Result<Self, Self::Error> {
        let creation_timestamp = parse_timestamp(&row.creation_timestamp).map_err(|e| {
            AppError::internal(format!(
                "Corrupt creation_timestamp '{}' for code {}: {e}",
                row.creation_timestamp, row.code
            ))
        })?;

        Ok(ShortenUrl::new(
            row.code,
            row.original_url,
            row.request_count,
            creation_timestamp,
        ))
    }
}

/// SQLite repository for shorten URL records.
///
/// All statements are parameterized. Mutations run inside a transaction that
/// is rolled back if it is dropped before commit.
pub struct SqliteShortenUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteShortenUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortenUrlRepository for SqliteShortenUrlRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM shorten_url WHERE code = ?)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(found != 0)
    }

    async fn insert(&self, new_record: NewShortenUrl) -> Result<ShortenUrl, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO shorten_url (code, original_url, request_count, creation_timestamp)
            VALUES (?, ?, 0, ?)
            "#,
        )
        .bind(&new_record.code)
        .bind(&new_record.original_url)
        .bind(format_timestamp(&new_record.creation_timestamp))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ShortenUrl::new(
            new_record.code,
            new_record.original_url,
            0,
            new_record.creation_timestamp,
        ))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortenUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortenUrlRow>(
            r#"
            SELECT code, original_url, request_count, creation_timestamp
            FROM shorten_url
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortenUrl::try_from).transpose()
    }

    async fn increment_request_count(&self, code: &str) -> Result<Option<ShortenUrl>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ShortenUrlRow>(
            r#"
            UPDATE shorten_url
            SET request_count = request_count + 1
            WHERE code = ?
            RETURNING code, original_url, request_count, creation_timestamp
            "#,
        )
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        row.map(ShortenUrl::try_from).transpose()
    }

    async fn summary(&self) -> Result<StoreSummary, AppError> {
        let (records, total_requests): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(request_count), 0) FROM shorten_url",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(StoreSummary {
            records,
            total_requests,
        })
    }
}
