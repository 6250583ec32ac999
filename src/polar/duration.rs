//! Elapsed-time strings as written by Polar (`H:M`, `H:M:S`, `H:M:S.ffffff`).

use chrono::{Duration, NaiveTime, Timelike};

use super::PolarError;

/// Parse a Polar duration string into an elapsed time with microsecond precision.
///
/// Polar occasionally writes a zero seconds field as `:.` (for example
/// `0:05:.5`); that artifact is read as `:00.`. The string is parsed as a
/// time of day and its fields are then reinterpreted as an elapsed duration,
/// so the hour field is limited to `0..=23`.
pub fn parse_duration(value: &str) -> Result<Duration, PolarError> {
    let value = value.trim();
    let normalized = value.replace(":.", ":00.");

    let format = if normalized.contains('.') {
        "%H:%M:%S%.f"
    } else if normalized.matches(':').count() == 1 {
        "%H:%M"
    } else {
        "%H:%M:%S"
    };

    let time = NaiveTime::parse_from_str(&normalized, format)
        .map_err(|_| PolarError::InvalidDuration(value.to_string()))?;

    Ok(Duration::hours(time.hour() as i64)
        + Duration::minutes(time.minute() as i64)
        + Duration::seconds(time.second() as i64)
        + Duration::microseconds((time.nanosecond() / 1_000) as i64))
}

/// Total elapsed seconds, including the fractional part.
pub fn total_seconds(duration: Duration) -> f64 {
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => duration.num_milliseconds() as f64 / 1_000.0,
    }
}
