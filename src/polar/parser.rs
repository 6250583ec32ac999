//! Extraction of the exercise record from a parsed Polar export.

use chrono::NaiveDateTime;
use std::str::FromStr;
use tracing::{debug, warn};

use super::duration::parse_duration;
use super::tree::Element;
use super::{Exercise, LapDefinition, PolarError, Reading, Samples};

/// Format of the `<time>` element, e.g. `2020-06-01 08:00:00.0`.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Sport label used when the export does not name one.
pub const DEFAULT_SPORT: &str = "Other";

/// Parse a Polar exercise export into an [`Exercise`].
pub fn parse_exercise(content: &str) -> Result<Exercise, PolarError> {
    let root = Element::parse(content)?;

    let exercise = if root.name == "exercise" {
        &root
    } else {
        let mut exercises = root.descendants("exercise");
        let first = exercises
            .next()
            .ok_or(PolarError::MissingElement("exercise"))?;
        if exercises.next().is_some() {
            warn!("Export contains more than one exercise, converting the first only");
        }
        first
    };

    let time_text = exercise
        .child_text("time")
        .ok_or(PolarError::MissingElement("time"))?;
    let start_local = parse_start_time(time_text)?;

    let name = exercise.child_text("name").unwrap_or_default().to_string();
    let sport = exercise
        .child_text("sport")
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SPORT)
        .to_string();

    let result = exercise
        .child("result")
        .ok_or(PolarError::MissingElement("result"))?;

    let duration = parse_duration(
        result
            .child_text("duration")
            .ok_or(PolarError::MissingElement("duration"))?,
    )?;

    let recording_rate = parse_number(
        "recording-rate",
        result
            .child_text("recording-rate")
            .ok_or(PolarError::MissingElement("recording-rate"))?,
    )?;

    let (avg_hr, max_hr) = heart_rate_stats(result)?;
    let (avg_hr, max_hr) = (avg_hr.value, max_hr.value);
    let laps = parse_laps(exercise)?;
    let samples = parse_samples(exercise)?;

    debug!(
        "Parsed exercise '{}' ({}): {} laps, {} heart-rate and {} speed samples",
        name,
        sport,
        laps.len(),
        samples.heart_rate.len(),
        samples.speed.len()
    );

    Ok(Exercise {
        start_local,
        name,
        sport,
        duration,
        recording_rate,
        avg_hr,
        max_hr,
        laps,
        samples,
    })
}

/// Parse the exercise start time (`YYYY-MM-DD HH:MM:SS[.ffffff]`).
pub fn parse_start_time(value: &str) -> Result<NaiveDateTime, PolarError> {
    NaiveDateTime::parse_from_str(value.trim(), START_TIME_FORMAT).map_err(|_| {
        PolarError::InvalidValue {
            field: "time",
            value: value.to_string(),
        }
    })
}

/// Laps come from the first `<laps>` block only; without one there are none.
fn parse_laps(exercise: &Element) -> Result<Vec<LapDefinition>, PolarError> {
    let Some(laps) = exercise.find("laps") else {
        return Ok(Vec::new());
    };

    laps.descendants("lap")
        .enumerate()
        .map(|(position, lap)| {
            let index = match lap.attribute("index") {
                Some(index) => parse_number("index", index)?,
                None => position as u32,
            };

            let duration = parse_duration(
                lap.child_text("duration")
                    .ok_or(PolarError::MissingElement("duration"))?,
            )?;

            let distance = match lap.child_text("distance").filter(|d| !d.is_empty()) {
                Some(distance) => parse_reading("distance", distance)?,
                None => Reading::from(0.0),
            };

            let (avg_hr, max_hr) = heart_rate_stats(lap)?;

            Ok(LapDefinition {
                index,
                duration,
                distance,
                avg_hr,
                max_hr,
            })
        })
        .collect()
}

fn parse_samples(exercise: &Element) -> Result<Samples, PolarError> {
    let mut samples = Samples::default();

    for sample in exercise.descendants("sample") {
        let kind = sample
            .child_text("type")
            .or_else(|| sample.attribute("type"))
            .unwrap_or_default()
            .to_ascii_lowercase();
        let values = sample.child_text("values").unwrap_or_default();

        match kind.as_str() {
            "heartrate" => samples.heart_rate = parse_values("values", values)?,
            "speed" => samples.speed = parse_values("values", values)?,
            other => debug!("Ignoring sample sequence of type '{}'", other),
        }
    }

    Ok(samples)
}

/// Average and maximum from a nested `<heart-rate>` block, zero when absent.
fn heart_rate_stats(parent: &Element) -> Result<(Reading<u8>, Reading<u8>), PolarError> {
    let Some(heart_rate) = parent.child("heart-rate") else {
        return Ok((Reading::from(0), Reading::from(0)));
    };

    let read = |field: &'static str| -> Result<Reading<u8>, PolarError> {
        match heart_rate.child_text(field).filter(|v| !v.is_empty()) {
            Some(value) => parse_reading(field, value),
            None => Ok(Reading::from(0)),
        }
    };

    Ok((read("average")?, read("maximum")?))
}

fn parse_values<T: FromStr>(
    field: &'static str,
    values: &str,
) -> Result<Vec<Reading<T>>, PolarError> {
    values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_reading(field, v))
        .collect()
}

fn parse_reading<T: FromStr>(field: &'static str, value: &str) -> Result<Reading<T>, PolarError> {
    Reading::parse(value).map_err(|_| PolarError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, PolarError> {
    value.trim().parse().map_err(|_| PolarError::InvalidValue {
        field,
        value: value.to_string(),
    })
}
