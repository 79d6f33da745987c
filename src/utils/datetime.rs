//! Date and time utility functions
//!
//! Completion timestamps are stored as ISO-8601 strings in UTC with
//! millisecond precision (`2026-10-19T08:30:00.000Z`). A task counts as
//! completed on a day when one of its timestamps starts with that day's
//! `YYYY-MM-DD` prefix.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, Utc};

/// Day format used for completion prefixes
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_day(day_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(day_str, DAY_FORMAT)
}

/// Format a day as the `YYYY-MM-DD` prefix matched against completion timestamps
pub fn day_prefix(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Format a UTC timestamp the way completion entries are stored
pub fn to_iso(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC day
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Check whether a stored timestamp falls on `day`
pub fn is_on_day(timestamp: &str, day: NaiveDate) -> bool {
    timestamp.starts_with(&day_prefix(day))
}

/// Timestamp recorded when a task is completed for `day`.
///
/// Completing for today records the actual moment; back-filling an earlier
/// (or later) day records noon UTC of that day.
pub fn completion_timestamp(day: NaiveDate, now: DateTime<Utc>) -> String {
    if day == now.date_naive() {
        return to_iso(now);
    }
    let noon = day.and_hms_opt(12, 0, 0).map_or(now, |noon| noon.and_utc());
    to_iso(noon)
}

/// The Sunday that starts the week containing `day`
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}
