//! Alignment of heart-rate, speed and GPS data onto a per-lap tick clock.
//!
//! Heart-rate and speed samples carry no timestamps of their own; they are
//! consumed one per tick through cursors that persist across laps. GPS points
//! are matched by exact timestamp only.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::laps::Lap;
use super::time::ceil_to_second;
use crate::polar::{Reading, Samples};
use crate::track::{GpsIndex, TrackPoint};

/// One merged output record.
#[derive(Debug, Clone, PartialEq)]
pub struct Trackpoint<'a> {
    pub time: DateTime<Utc>,
    pub position: Option<&'a TrackPoint>,
    pub heart_rate: Option<&'a Reading<u8>>,
    pub speed: Option<&'a Reading<f64>>,
}

/// Walks laps in order, handing out samples and GPS matches per tick.
#[derive(Debug)]
pub struct Aligner<'a> {
    heart_rate: &'a [Reading<u8>],
    speed: &'a [Reading<f64>],
    gps: &'a GpsIndex,
    interval: Duration,
    hr_cursor: usize,
    speed_cursor: usize,
    gps_assigned: usize,
    ticks: usize,
}

impl<'a> Aligner<'a> {
    /// `recording_rate` is the tick interval in whole seconds and must be non-zero.
    pub fn new(samples: &'a Samples, gps: &'a GpsIndex, recording_rate: u32) -> Self {
        Self {
            heart_rate: &samples.heart_rate,
            speed: &samples.speed,
            gps,
            interval: Duration::seconds(recording_rate.max(1) as i64),
            hr_cursor: 0,
            speed_cursor: 0,
            gps_assigned: 0,
            ticks: 0,
        }
    }

    /// Emit the trackpoints of one lap. Laps must be aligned in order.
    pub fn align_lap(&mut self, lap: &Lap) -> Vec<Trackpoint<'a>> {
        let end = lap.end();
        let mut time = ceil_to_second(lap.start);
        let mut points = Vec::new();

        while time < end {
            let position = self.gps.get(&time);
            if position.is_some() {
                self.gps_assigned += 1;
            }

            let heart_rate = self.heart_rate.get(self.hr_cursor);
            if heart_rate.is_some() {
                self.hr_cursor += 1;
            }

            let speed = self.speed.get(self.speed_cursor);
            if speed.is_some() {
                self.speed_cursor += 1;
            }

            points.push(Trackpoint {
                time,
                position,
                heart_rate,
                speed,
            });
            time += self.interval;
        }

        self.ticks += points.len();
        debug!(
            "Lap {}: {} trackpoints, heart-rate cursor at {}, speed cursor at {}",
            lap.index,
            points.len(),
            self.hr_cursor,
            self.speed_cursor
        );

        points
    }

    /// Heart-rate samples consumed so far.
    pub fn heart_rate_used(&self) -> usize {
        self.hr_cursor
    }

    /// Speed samples consumed so far.
    pub fn speed_used(&self) -> usize {
        self.speed_cursor
    }

    /// Ticks that received a GPS point.
    pub fn gps_assigned(&self) -> usize {
        self.gps_assigned
    }

    /// Ticks emitted across all laps.
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}
