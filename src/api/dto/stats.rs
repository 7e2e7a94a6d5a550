//! DTOs for short code statistics.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::entities::ShortenUrl;
use crate::domain::entities::shorten_url::format_timestamp;

/// Full record of a short code with its usage counter.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub code: String,
    pub original_url: String,
    pub request_count: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_timestamp: DateTime<Utc>,
}

impl From<ShortenUrl> for StatsResponse {
    fn from(record: ShortenUrl) -> Self {
        Self {
            code: record.code,
            original_url: record.original_url,
            request_count: record.request_count,
            creation_timestamp: record.creation_timestamp,
        }
    }
}

/// Same microsecond ISO-8601 form the store uses, e.g. `2025-08-16T14:03:49.425298`.
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}
