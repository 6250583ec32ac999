//! Timestamp helpers: local-to-UTC conversion, tick rounding and formatting.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, SubsecRound, TimeZone, Timelike, Utc};

/// Format used for every timestamp in the output document.
pub const TCX_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Convert a wall-clock time recorded in `tz` to UTC, dropping any sub-second part.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant. Times
/// that fall into a gap (clocks turned forward) are shifted forward by the
/// size of a typical one hour gap. Returns `None` only if neither resolves.
pub fn local_to_utc<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    let local = local.trunc_subsecs(0);

    let resolved = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest(),
    };

    resolved.map(|dt| dt.with_timezone(&Utc))
}

/// Round a timestamp up to the next whole second if it has a fractional part.
pub fn ceil_to_second(time: DateTime<Utc>) -> DateTime<Utc> {
    if time.nanosecond() > 0 {
        time.trunc_subsecs(0) + Duration::seconds(1)
    } else {
        time
    }
}

/// Start time derived from the end of the GPS track.
///
/// The last heart-rate sample is assumed to coincide with the last GPS point,
/// so the exercise started `(samples - 1) * recording_rate` seconds earlier.
pub fn start_from_track_end(
    track_end: DateTime<Utc>,
    sample_count: usize,
    recording_rate: u32,
) -> DateTime<Utc> {
    let intervals = sample_count.saturating_sub(1) as i64;
    track_end - Duration::seconds(intervals * recording_rate as i64)
}

pub fn format_tcx_time(time: &DateTime<Utc>) -> String {
    time.format(TCX_TIME_FORMAT).to_string()
}
