//! Polar exercise export reader.
//!
//! Reads the XML written by Polar training software: one exercise with its
//! start time, result summary, lap definitions and sample sequences.

pub mod duration;
pub mod parser;
pub mod reading;
pub mod tree;

use chrono::{Duration, NaiveDateTime};
use std::path::Path;
use thiserror::Error;

pub use duration::parse_duration;
pub use parser::parse_exercise;
pub use reading::Reading;

/// One recorded training session.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    /// Wall-clock start time as recorded by the device (no zone)
    pub start_local: NaiveDateTime,
    /// Free-text exercise name (empty when absent)
    pub name: String,
    /// Sport label, written to the output verbatim
    pub sport: String,
    /// Total exercise duration
    pub duration: Duration,
    /// Seconds between consecutive samples
    pub recording_rate: u32,
    /// Average heart rate over the exercise (0 when absent)
    pub avg_hr: u8,
    /// Maximum heart rate over the exercise (0 when absent)
    pub max_hr: u8,
    /// Declared laps in document order
    pub laps: Vec<LapDefinition>,
    /// Heart-rate and speed sample sequences
    pub samples: Samples,
}

/// A lap as declared in the export: elapsed duration plus summary stats.
#[derive(Debug, Clone, PartialEq)]
pub struct LapDefinition {
    pub index: u32,
    pub duration: Duration,
    /// Distance in meters (0 when absent)
    pub distance: Reading<f64>,
    pub avg_hr: Reading<u8>,
    pub max_hr: Reading<u8>,
}

/// Sample sequences, one value per recording interval from the exercise start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    /// Heart rate in BPM
    pub heart_rate: Vec<Reading<u8>>,
    /// Speed in the device's units
    pub speed: Vec<Reading<f64>>,
}

/// Errors that can occur while reading a Polar export
#[derive(Debug, Error)]
pub enum PolarError {
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("Missing element <{0}>")]
    MissingElement(&'static str),

    #[error("Invalid value for <{field}>: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read and parse an exercise export from disk.
pub fn read_exercise(path: &Path) -> Result<Exercise, PolarError> {
    let content = std::fs::read_to_string(path)?;
    parse_exercise(&content)
}
