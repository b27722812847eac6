use crate::error::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current calendar date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from `today` until `expiration`; negative once expired.
pub fn days_until(expiration: NaiveDate, today: NaiveDate) -> i64 {
    (expiration - today).num_days()
}

/// Parse a `YYYY-MM-DD` date, also accepting a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Validate a required date query parameter.
pub fn require_date(name: &str, value: Option<&str>) -> AppResult<NaiveDate> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::ValidationError("startDate and endDate are required".to_string()))?;
    parse_date(raw).ok_or_else(|| {
        AppError::ValidationError(format!("{name} must be a date in YYYY-MM-DD format"))
    })
}
