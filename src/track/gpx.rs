//! GPX track reader.

use super::{TrackError, TrackPoint};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{info, warn};

/// Convert gpx Time to chrono DateTime
fn gpx_time_to_chrono(time: ::gpx::Time) -> Option<DateTime<Utc>> {
    // gpx::Time wraps time::OffsetDateTime, convert via string format
    let formatted = time.format().ok()?;
    DateTime::parse_from_rfc3339(&formatted)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse GPX content into track points, in recorded order.
///
/// Points from every track and segment are returned. Points without a usable
/// timestamp can never be aligned and are dropped.
pub fn parse_gpx(content: &[u8]) -> Result<Vec<TrackPoint>, TrackError> {
    let gpx_data: ::gpx::Gpx =
        ::gpx::read(content).map_err(|e| TrackError::ParseError(e.to_string()))?;

    let mut points = Vec::new();
    let mut skipped = 0usize;

    for track in gpx_data.tracks {
        for segment in track.segments {
            for point in segment.points {
                let location = point.point();
                let Some(time) = point.time.and_then(gpx_time_to_chrono) else {
                    skipped += 1;
                    continue;
                };
                points.push(TrackPoint {
                    latitude: location.y(),
                    longitude: location.x(),
                    elevation: point.elevation,
                    time,
                    satellites: point.sat,
                });
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} track points without a timestamp", skipped);
    }

    Ok(points)
}

/// Read a GPX file from disk.
pub fn read_track(path: &Path) -> Result<Vec<TrackPoint>, TrackError> {
    let content = std::fs::read(path)?;
    let points = parse_gpx(&content)?;
    info!("Parsed {} track points from {}", points.len(), path.display());
    Ok(points)
}
