//! Timestamp parsing and comparison.

use chrono::{NaiveDateTime, Weekday};

use crate::config::{ARCHIVE_TIMESTAMP_FORMAT, LAST_MODIFIED_FORMAT, MANIFEST_TIMESTAMP_FORMAT};

/// Parses the `YYYY-MM-DD HH:MM:SS` half of a manifest entry.
pub fn parse_manifest_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), MANIFEST_TIMESTAMP_FORMAT)
}

/// Parses a `Last-Modified` header such as `Mon, 01 Jan 2024 00:00:00 GMT`.
///
/// The zone name is skipped, so the result is the wall-clock time as written.
/// The leading token must be a weekday name but is not checked against the
/// date, so `Tue, 01 Jan 2024 ...` still parses.
pub fn parse_last_modified(value: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = value.trim().split_once(", ")?;
    weekday.parse::<Weekday>().ok()?;
    NaiveDateTime::parse_from_str(rest.trim(), LAST_MODIFIED_FORMAT).ok()
}

/// Formats a `Last-Modified` header as a file-name-safe suffix.
pub fn format_archive_timestamp(last_modified: &str) -> Option<String> {
    parse_last_modified(last_modified).map(|t| t.format(ARCHIVE_TIMESTAMP_FORMAT).to_string())
}

/// Returns true when the observed time does not exactly equal the expected one.
///
/// An unknown observation always counts as a mismatch.
pub fn is_timestamp_mismatch(expected: NaiveDateTime, observed: Option<NaiveDateTime>) -> bool {
    observed != Some(expected)
}
