//! Conversion core: exercise + optional track in, TCX document out.

pub mod align;
pub mod laps;
pub mod time;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::export::{create_output, ExportError, TcxWriter};
use crate::polar::{read_exercise, Exercise, PolarError};
use crate::track::{read_track, GpsIndex, TrackError, TrackPoint};

pub use align::{Aligner, Trackpoint};
pub use laps::{build_laps, Lap};

/// How the absolute exercise start time is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartTimeSource {
    /// The `<time>` element of the exercise, converted from local time
    #[default]
    Exercise,
    /// Last GPS point minus the span covered by the heart-rate samples
    TrackEnd,
}

/// Everything the core needs for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub exercise_path: PathBuf,
    pub track_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub start_time: StartTimeSource,
}

/// Counts reported after a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub laps: usize,
    pub trackpoints: usize,
    pub heart_rate_used: usize,
    pub speed_used: usize,
    pub gps_parsed: usize,
    pub gps_assigned: usize,
}

/// Errors that can occur during conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Recording rate must be at least one second")]
    InvalidRecordingRate,

    #[error("Start time {0} does not exist in the local timezone")]
    UnresolvableLocalTime(String),

    #[error("Deriving the start time from the track needs GPS points and heart-rate samples")]
    MissingTrackForStart,

    #[error("Exercise error: {0}")]
    Exercise(#[from] PolarError),

    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Check input and output paths before any work is done.
pub fn validate_paths(config: &ConvertConfig) -> Result<(), ConvertError> {
    let inputs = std::iter::once(&config.exercise_path).chain(config.track_path.as_ref());
    for input in inputs {
        if !input.is_file() {
            return Err(ConvertError::InputNotFound(input.clone()));
        }
    }

    if config.output_path.exists() {
        return Err(ConvertError::OutputExists(config.output_path.clone()));
    }

    Ok(())
}

/// Convert using the host's local timezone for the exercise start.
pub fn convert(config: &ConvertConfig) -> Result<ConvertSummary, ConvertError> {
    convert_with_timezone(config, &Local)
}

/// Convert, interpreting the exercise start time in `tz`.
pub fn convert_with_timezone<Tz: TimeZone>(
    config: &ConvertConfig,
    tz: &Tz,
) -> Result<ConvertSummary, ConvertError> {
    validate_paths(config)?;

    let exercise = read_exercise(&config.exercise_path)?;
    info!(
        "Read exercise '{}' with {} heart-rate and {} speed samples",
        exercise.name,
        exercise.samples.heart_rate.len(),
        exercise.samples.speed.len()
    );

    let track = match &config.track_path {
        Some(path) => read_track(path)?,
        None => Vec::new(),
    };

    // Everything that can reject the input runs before the output file exists
    let activity = Activity::prepare(&exercise, track, config.start_time, tz)?;
    info!(
        "Exercise starts at {} with {} laps",
        time::format_tcx_time(&activity.start()),
        activity.laps().len()
    );

    let output = create_output(&config.output_path).map_err(|e| match e {
        ExportError::OutputExists(path) => ConvertError::OutputExists(path),
        other => ConvertError::Export(other),
    })?;

    let summary = activity.write(output)?;
    info!(
        "Wrote {} laps, {} trackpoints to {}",
        summary.laps,
        summary.trackpoints,
        config.output_path.display()
    );
    Ok(summary)
}

/// An exercise placed on the absolute timeline, ready to be written.
#[derive(Debug)]
pub struct Activity<'a> {
    exercise: &'a Exercise,
    start: DateTime<Utc>,
    gps: GpsIndex,
    gps_parsed: usize,
    laps: Vec<Lap>,
}

impl<'a> Activity<'a> {
    /// Validate the exercise, resolve its start and lay out the laps.
    pub fn prepare<Tz: TimeZone>(
        exercise: &'a Exercise,
        track: Vec<TrackPoint>,
        start_time: StartTimeSource,
        tz: &Tz,
    ) -> Result<Self, ConvertError> {
        if exercise.recording_rate == 0 {
            return Err(ConvertError::InvalidRecordingRate);
        }

        let start = resolve_start(exercise, &track, start_time, tz)?;
        let gps_parsed = track.len();
        let gps = GpsIndex::new(track);
        if gps.is_empty() {
            debug!("No GPS points, trackpoints will carry no position");
        } else {
            debug!("Indexed {} GPS points under {} timestamps", gps_parsed, gps.len());
        }

        Ok(Self {
            exercise,
            start,
            gps,
            gps_parsed,
            laps: build_laps(exercise, start),
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Align samples and GPS points and stream the TCX document into `out`.
    pub fn write<W: Write>(&self, out: W) -> Result<ConvertSummary, ConvertError> {
        let exercise = self.exercise;
        let mut aligner = Aligner::new(&exercise.samples, &self.gps, exercise.recording_rate);
        let mut tcx = TcxWriter::new(out, !exercise.samples.heart_rate.is_empty());

        tcx.begin(&exercise.sport, &self.start)?;
        for lap in &self.laps {
            let points = aligner.align_lap(lap);
            tcx.write_lap(lap, &points)?;
        }
        tcx.finish()?;

        info!(
            "Assigned {} of {} GPS points",
            aligner.gps_assigned(),
            self.gps_parsed
        );

        Ok(ConvertSummary {
            laps: self.laps.len(),
            trackpoints: aligner.ticks(),
            heart_rate_used: aligner.heart_rate_used(),
            speed_used: aligner.speed_used(),
            gps_parsed: self.gps_parsed,
            gps_assigned: aligner.gps_assigned(),
        })
    }
}

fn resolve_start<Tz: TimeZone>(
    exercise: &Exercise,
    track: &[TrackPoint],
    source: StartTimeSource,
    tz: &Tz,
) -> Result<DateTime<Utc>, ConvertError> {
    match source {
        StartTimeSource::Exercise => time::local_to_utc(exercise.start_local, tz)
            .ok_or_else(|| ConvertError::UnresolvableLocalTime(exercise.start_local.to_string())),
        StartTimeSource::TrackEnd => {
            let last = track.last().ok_or(ConvertError::MissingTrackForStart)?;
            if exercise.samples.heart_rate.is_empty() {
                return Err(ConvertError::MissingTrackForStart);
            }
            Ok(time::start_from_track_end(
                last.time,
                exercise.samples.heart_rate.len(),
                exercise.recording_rate,
            ))
        }
    }
}
