//! Wall clock access and conversion of user-supplied times into Unix nanoseconds.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::{Error, Result};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Numeric inputs above this are taken as nanoseconds, anything else as seconds.
const MAX_EPOCH_SECONDS: i128 = 0xffff_ffff;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns the current wall clock time as nanoseconds since the Unix epoch.
///
/// A clock set before 1970 yields a negative value rather than an error.
pub fn now_ns() -> i128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as i128,
        Err(err) => -(err.duration().as_nanos() as i128),
    }
}

/// Parses a time given as ISO 8601 text or as a numeric epoch value.
///
/// - ISO 8601 date-times with an offset are honored; those without one are read as UTC, not as
///   local time. A bare date means midnight UTC.
/// - Numbers up to `0xffffffff` are seconds (fractions allowed); larger numbers are already
///   nanoseconds.
///
/// # Examples
///
/// ```rust
/// use uuidtool::time::parse_time;
///
/// assert_eq!(parse_time("2022-02-22T19:22:22Z")?, 1_645_557_742_000_000_000);
/// assert_eq!(parse_time("1645557742")?, 1_645_557_742_000_000_000);
/// assert_eq!(parse_time("1645557742000000000")?, 1_645_557_742_000_000_000);
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn parse_time(input: &str) -> Result<i128> {
    let text = input.trim();

    if let Some(nanos) = parse_iso8601(text) {
        return Ok(nanos);
    }

    if let Ok(value) = text.parse::<i128>() {
        return if value > MAX_EPOCH_SECONDS {
            Ok(value)
        } else {
            value
                .checked_mul(NANOS_PER_SECOND)
                .ok_or_else(|| invalid(input))
        };
    }

    let nanos = match text.parse::<f64>() {
        Ok(value) if value > MAX_EPOCH_SECONDS as f64 => value,
        Ok(value) => value * 1e9,
        Err(_) => return Err(invalid(input)),
    };
    // 2^127 is exact in f64; `as` would saturate anything at or beyond it
    let limit = 2f64.powi(127);
    if nanos.is_finite() && -limit <= nanos && nanos < limit {
        Ok(nanos as i128)
    } else {
        Err(invalid(input))
    }
}

fn invalid(input: &str) -> Error {
    Error::InvalidTimeFormat {
        input: input.to_owned(),
    }
}

fn parse_iso8601(text: &str) -> Option<i128> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(to_nanos(&dt));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(to_nanos(&dt));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(to_nanos(&Utc.from_utc_datetime(&naive)));
        }
    }
    let midnight = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(to_nanos(&Utc.from_utc_datetime(&midnight)))
}

fn to_nanos<Tz: TimeZone>(dt: &DateTime<Tz>) -> i128 {
    i128::from(dt.timestamp()) * NANOS_PER_SECOND + i128::from(dt.timestamp_subsec_nanos())
}

/// Formats Unix nanoseconds as an RFC 3339 UTC string, or `None` if chrono cannot represent the
/// instant.
pub fn format_time(nanos: i128) -> Option<String> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    let dt = DateTime::<Utc>::from_timestamp(secs, subsec)?;
    Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
