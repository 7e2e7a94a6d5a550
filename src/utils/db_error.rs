//! Classification of database driver errors.

/// SQLite reports primary key and unique index violations with this prefix.
const SQLITE_UNIQUE_MESSAGE: &str = "UNIQUE constraint failed";

/// Returns the violated constraint description if `e` is a unique-key violation.
///
/// SQLite does not name constraints, so the driver message
/// (`UNIQUE constraint failed: shorten_url.code`) is used as the detail.
pub fn unique_violation_detail(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() && !db_err.message().starts_with(SQLITE_UNIQUE_MESSAGE) {
        return None;
    }

    let detail = db_err
        .message()
        .strip_prefix(SQLITE_UNIQUE_MESSAGE)
        .map(|rest| rest.trim_start_matches(':').trim().to_string())
        .filter(|rest| !rest.is_empty())
        .or_else(|| db_err.constraint().map(str::to_string))
        .unwrap_or_else(|| db_err.message().to_string());

    Some(detail)
}
