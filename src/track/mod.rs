//! GPS track points and the timestamp index used during alignment.

pub mod gpx;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

pub use self::gpx::{parse_gpx, read_track};

/// One recorded GPS location.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters
    pub elevation: Option<f64>,
    /// UTC timestamp with sub-second precision
    pub time: DateTime<Utc>,
    /// Number of satellites in view (not written to the output)
    pub satellites: Option<u64>,
}

/// Errors that can occur while reading a GPS track
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("GPX parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Track points keyed by their exact UTC timestamp.
///
/// Keys keep the full sub-second precision of the source, so a point recorded
/// at `T + 0.3s` is never found by a lookup at `T`. When two points share a
/// timestamp the one inserted last wins.
#[derive(Debug, Clone, Default)]
pub struct GpsIndex {
    points: HashMap<DateTime<Utc>, TrackPoint>,
}

impl GpsIndex {
    /// Build the index from points in recorded order.
    pub fn new(points: impl IntoIterator<Item = TrackPoint>) -> Self {
        let points = points.into_iter().map(|p| (p.time, p)).collect();
        Self { points }
    }

    pub fn get(&self, time: &DateTime<Utc>) -> Option<&TrackPoint> {
        self.points.get(time)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<TrackPoint> for GpsIndex {
    fn from_iter<I: IntoIterator<Item = TrackPoint>>(iter: I) -> Self {
        Self::new(iter)
    }
}
