//! Shorten URL entity: the mapping from a short code to an original URL.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// Storage format of `creation_timestamp`: ISO-8601 with microseconds, UTC, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A persisted short code record.
///
/// `code` and `original_url` never change after creation. `request_count`
/// only grows, one step per successful redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortenUrl {
    pub code: String,
    pub original_url: String,
    pub request_count: i64,
    pub creation_timestamp: DateTime<Utc>,
}

impl ShortenUrl {
    /// Creates a new ShortenUrl instance.
    pub fn new(
        code: String,
        original_url: String,
        request_count: i64,
        creation_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            original_url,
            request_count,
            creation_timestamp,
        }
    }

    /// Path under which the redirect for this record is served.
    pub fn redirect_path(&self) -> String {
        format!("/s/{}", self.code)
    }
}

/// Input data for creating a new record. The counter always starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortenUrl {
    pub code: String,
    pub original_url: String,
    pub creation_timestamp: DateTime<Utc>,
}

impl NewShortenUrl {
    /// Stamps the record with the current time truncated to microseconds.
    pub fn now(code: String, original_url: String) -> Self {
        Self {
            code,
            original_url,
            creation_timestamp: Utc::now().trunc_subsecs(6),
        }
    }
}

/// Formats a timestamp the way the store keeps it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp. A missing fractional part is accepted.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_shorten_url_creation() {
        let now = Utc::now();
        let record = ShortenUrl::new(
            "3tQ3Ta".to_string(),
            "https://www.json.org".to_string(),
            0,
            now,
        );

        assert_eq!(record.code, "3tQ3Ta");
        assert_eq!(record.original_url, "https://www.json.org");
        assert_eq!(record.request_count, 0);
        assert_eq!(record.creation_timestamp, now);
        assert_eq!(record.redirect_path(), "/s/3tQ3Ta");
    }

    #[test]
    fn test_new_shorten_url_has_microsecond_precision() {
        let new_record = NewShortenUrl::now("abc123".to_string(), "https://example.com".to_string());
        assert_eq!(new_record.creation_timestamp.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc
            .with_ymd_and_hms(2025, 8, 16, 14, 3, 49)
            .unwrap()
            .with_nanosecond(425_298_000)
            .unwrap();

        assert_eq!(format_timestamp(&ts), "2025-08-16T14:03:49.425298");
    }

    #[test]
    fn test_format_timestamp_pads_zero_micros() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-02T03:04:05.000000");
    }

    #[test]
    fn test_parse_timestamp_round_trip() {
        let ts = Utc::now().trunc_subsecs(6);
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        let ts = parse_timestamp("2025-08-16T14:03:49").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 8, 16, 14, 3, 49).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
