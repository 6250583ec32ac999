//! Lap builder: absolute start times from cumulative lap durations.

use chrono::{DateTime, Duration, Utc};

use crate::polar::{Exercise, LapDefinition, Reading};

/// A lap placed on the absolute timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    pub index: u32,
    pub start: DateTime<Utc>,
    pub duration: Duration,
    /// Distance in meters
    pub distance: Reading<f64>,
    pub avg_hr: Reading<u8>,
    pub max_hr: Reading<u8>,
}

impl Lap {
    /// Place a declared lap at `start`.
    pub fn from_definition(definition: &LapDefinition, start: DateTime<Utc>) -> Self {
        Self {
            index: definition.index,
            start,
            duration: definition.duration,
            distance: definition.distance.clone(),
            avg_hr: definition.avg_hr.clone(),
            max_hr: definition.max_hr.clone(),
        }
    }

    /// Synthetic lap spanning the whole exercise. Stats stay at zero.
    pub fn whole_exercise(start: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            index: 0,
            start,
            duration,
            distance: Reading::from(0.0),
            avg_hr: Reading::from(0),
            max_hr: Reading::from(0),
        }
    }

    /// Exclusive end of the lap.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.duration
    }
}

/// Lay out the exercise's laps back to back from `start`.
///
/// An exercise without declared laps yields exactly one lap covering its
/// full duration.
pub fn build_laps(exercise: &Exercise, start: DateTime<Utc>) -> Vec<Lap> {
    if exercise.laps.is_empty() {
        return vec![Lap::whole_exercise(start, exercise.duration)];
    }

    let mut lap_start = start;
    exercise
        .laps
        .iter()
        .map(|definition| {
            let lap = Lap::from_definition(definition, lap_start);
            lap_start = lap.end();
            lap
        })
        .collect()
}
