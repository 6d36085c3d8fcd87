//! Parsing of the caller-supplied `measure_datetime` field.
//!
//! The field is the calendar timestamp the reading belongs to, not the
//! wall-clock ingestion time. Callers send it in several ISO-8601 shapes
//! (full RFC 3339, a naive datetime, or a bare date), all of which must be
//! accepted; anything else is invalid data.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::CoreError;

/// Parse an ISO-8601 timestamp string into a naive datetime.
///
/// Accepted forms, tried in order:
/// - RFC 3339 with offset (`2024-05-01T10:30:00Z`, `...-03:00`), where the
///   offset is applied and the UTC instant kept;
/// - `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS` (fractional seconds
///   allowed);
/// - bare `YYYY-MM-DD`, taken as midnight.
pub fn parse_measure_datetime(s: &str) -> Result<NaiveDateTime, CoreError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    }

    Err(CoreError::InvalidData(format!(
        "Invalid measure_datetime (expected ISO-8601): {s}"
    )))
}
