//! `Retry-After` resolution.
//!
//! Only the HTTP-date form is supported (RFC 7231 §7.1.1.1 IMF-fixdate):
//!
//! ```text
//! Mon, 02 Jan 2006 15:04:05 GMT
//! ```
//!
//! An unset or malformed `RETRY_AFTER` is not an error. It means nobody
//! knows when maintenance ends, so the header is simply left out.

use chrono::{NaiveDateTime, Timelike, Weekday};

use crate::config::{ConfigSource, RETRY_AFTER};

/// chrono pattern for an IMF-fixdate once the weekday has been split off.
const DATE_TIME_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

/// What the configuration says about `Retry-After`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Configured {
    Unset,
    Valid(String),
    /// Set, but not an HTTP-date. Carries the raw value.
    Invalid(String),
}

/// Reports whether `value` is an IMF-fixdate with valid calendar values.
///
/// Day and month names match regardless of case. The weekday has to be a
/// real three-letter name but is not checked against the date. Day, minute
/// and second are two digits, the year four, and the zone is literally
/// `GMT`. Leap seconds are rejected.
pub fn is_valid_retry_after(value: &str) -> bool {
    let Some((weekday, rest)) = value.split_once(", ") else {
        return false;
    };
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return false;
    }

    let fields: Vec<&str> = rest.split(' ').collect();
    let [day, month, year, time, "GMT"] = fields[..] else {
        return false;
    };
    if !is_digits(day, 2) || month.len() != 3 || !is_digits(year, 4) || !is_clock(time) {
        return false;
    }

    NaiveDateTime::parse_from_str(rest, DATE_TIME_FORMAT)
        .is_ok_and(|date| date.nanosecond() < 1_000_000_000)
}

/// `H:MM:SS` or `HH:MM:SS`.
fn is_clock(time: &str) -> bool {
    let mut parts = time.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => {
            (is_digits(h, 1) || is_digits(h, 2)) && is_digits(m, 2) && is_digits(s, 2)
        }
        _ => false,
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Classifies the configured value without dropping it.
pub fn inspect(source: &dyn ConfigSource) -> Configured {
    match source.get(RETRY_AFTER) {
        None => Configured::Unset,
        Some(value) if is_valid_retry_after(&value) => Configured::Valid(value),
        Some(value) => Configured::Invalid(value),
    }
}

/// Returns the configured `Retry-After` value, verbatim, if it is valid.
pub fn resolve(source: &dyn ConfigSource) -> Option<String> {
    source.get(RETRY_AFTER).filter(|value| is_valid_retry_after(value))
}
