//! Date canonicalization for metric rows.
//!
//! Every row is keyed by a calendar day. The provider normally sends plain
//! `YYYY-MM-DD` dates, but timestamps with a time component are reduced to
//! their day so the output always carries the canonical form.

use crate::error::{CoreError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical date format used in the output document.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a raw date cell into a calendar day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps.
pub fn parse_metric_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    Err(CoreError::InvalidDate(trimmed.to_string()))
}
