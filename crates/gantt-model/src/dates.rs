//! Calendar date handling
//!
//! Record dates are carried as the strings the data source provided; this
//! module is the one place they get interpreted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const SECONDS_PER_DAY: u64 = 86_400;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Date parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Input was empty or whitespace
    #[error("empty date")]
    Empty,

    /// Input matched none of the accepted formats
    #[error("unrecognised date: '{0}'")]
    Unrecognised(String),
}

/// Parse a record date into an instant (UTC, naive)
///
/// Accepted: `YYYY-MM-DD` (midnight), RFC 3339 timestamps (converted to UTC),
/// and naive `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS`.
///
/// # Errors
/// Returns [`DateError`] when the input is empty or in no accepted format.
pub fn parse_instant(raw: &str) -> Result<NaiveDateTime, DateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive);
        }
    }

    Err(DateError::Unrecognised(raw.to_string()))
}

/// Parse a record date, keeping only the calendar day
///
/// # Errors
/// Same as [`parse_instant`].
#[inline]
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    parse_instant(raw).map(|instant| instant.date())
}

/// Whole days between two record dates, rounded up
///
/// The distance is absolute, so a reversed range still yields its length.
/// Identical dates yield 0.
///
/// # Errors
/// Returns [`DateError`] if either bound fails to parse.
#[inline]
pub fn duration_days(start: &str, end: &str) -> Result<u32, DateError> {
    span(start, end).map(|span| span.days)
}

/// Length and direction of a date range, from a single parse of each bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    /// Whole days between the bounds, rounded up
    pub days: u32,
    /// `end` falls before `start`
    pub reversed: bool,
}

/// Measure a range of record dates
///
/// # Errors
/// Returns [`DateError`] if either bound fails to parse.
pub fn span(start: &str, end: &str) -> Result<DateSpan, DateError> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let seconds = (end - start).num_seconds().unsigned_abs();
    let days = seconds.div_ceil(SECONDS_PER_DAY);
    Ok(DateSpan {
        days: u32::try_from(days).unwrap_or(u32::MAX),
        reversed: end < start,
    })
}

/// Whether `end` falls before `start`
///
/// Unparseable bounds are not considered reversed.
#[must_use]
pub fn is_reversed(start: &str, end: &str) -> bool {
    match (parse_instant(start), parse_instant(end)) {
        (Ok(start), Ok(end)) => end < start,
        _ => false,
    }
}

/// First and last day of a calendar year, formatted `YYYY-MM-DD`
#[must_use]
pub fn year_bounds(year: i32) -> (String, String) {
    (format!("{year:04}-01-01"), format!("{year:04}-12-31"))
}
