//! Parsing of `until` filter values into an absolute instant.
//!
//! Accepted forms:
//! - durations such as `90s`, `10m`, `1h30m` or `1.5h`, meaning that long before now
//! - Unix timestamps in seconds, optionally fractional: `1700000000.25`
//! - RFC 3339 timestamps: `2024-05-01T10:00:00Z`
//! - local date-times and dates: `2024-05-01T10:00:00`, `2024-05-01T10:00`, `2024-05-01`

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use thiserror::Error;

/// Errors from computing an `until` instant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UntilError {
    /// `until` takes a single value.
    #[error("specify exactly one timestamp for until, got {0}")]
    WrongCount(usize),

    /// The value is neither a duration nor a timestamp.
    #[error("failed to parse value as time or duration: {0:?}")]
    Invalid(String),
}

/// Computes the instant named by the single `until` value, relative to `now`.
///
/// # Errors
///
/// Returns `UntilError::WrongCount` unless exactly one value is given, and
/// `UntilError::Invalid` if the value cannot be parsed.
pub fn compute_until_timestamp(
    values: &[String],
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, UntilError> {
    let [value] = values else {
        return Err(UntilError::WrongCount(values.len()));
    };
    parse_timestamp(value.trim(), now).ok_or_else(|| UntilError::Invalid(value.clone()))
}

fn parse_timestamp(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    // a bare "0" is the epoch, not a zero duration
    if value != "0" {
        if let Some(duration) = parse_duration(value) {
            return now.checked_sub_signed(duration);
        }
    }

    if let Some(ts) = parse_unix(value) {
        return Some(ts);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    const LOCAL_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    let naive = LOCAL_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Parses a duration like `1h30m`, `1.5s` or `-10m`.
fn parse_duration(value: &str) -> Option<TimeDelta> {
    let (negative, mut rest) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    if rest.is_empty() {
        return None;
    }

    let mut total_nanos = 0f64;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return None;
        }
        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return None,
        };
        total_nanos += number.parse::<f64>().ok()? * scale;
        rest = tail;
    }

    if !total_nanos.is_finite() || total_nanos > i64::MAX as f64 {
        return None;
    }
    let nanos = total_nanos as i64;
    Some(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

/// Parses `seconds[.fraction]` since the Unix epoch.
fn parse_unix(value: &str) -> Option<DateTime<Utc>> {
    let (secs, frac) = match value.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (value, ""),
    };
    if secs.is_empty()
        || !secs.bytes().all(|b| b.is_ascii_digit())
        || frac.len() > 9
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let secs: i64 = secs.parse().ok()?;
    let nanos: u32 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<9}").parse().ok()?
    };
    DateTime::from_timestamp(secs, nanos)
}
