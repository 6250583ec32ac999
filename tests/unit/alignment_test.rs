//! Unit tests for the alignment of samples and GPS points onto laps

use chrono::{DateTime, Duration, TimeZone, Utc};
use polar2tcx::convert::align::Aligner;
use polar2tcx::convert::laps::Lap;
use polar2tcx::polar::{Reading, Samples};
use polar2tcx::track::{GpsIndex, TrackPoint};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap()
}

fn track_point(time: DateTime<Utc>) -> TrackPoint {
    TrackPoint {
        latitude: 59.9,
        longitude: 10.7,
        elevation: None,
        time,
        satellites: None,
    }
}

fn samples(heart_rate: &[u8], speed: &[f64]) -> Samples {
    Samples {
        heart_rate: heart_rate.iter().copied().map(Reading::from).collect(),
        speed: speed.iter().copied().map(Reading::from).collect(),
    }
}

fn contiguous_laps(durations: &[Duration]) -> Vec<Lap> {
    let mut lap_start = start();
    durations
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut lap = Lap::whole_exercise(lap_start, *d);
            lap.index = i as u32;
            lap_start = lap.end();
            lap
        })
        .collect()
}

#[test]
fn test_heart_rate_never_exceeds_sequence_length() {
    let heart_rate: Vec<u8> = (0..7).map(|i| 120 + i).collect();
    let samples = samples(&heart_rate, &[]);
    let gps = GpsIndex::default();
    let mut aligner = Aligner::new(&samples, &gps, 1);

    let laps = contiguous_laps(&[
        Duration::milliseconds(3200),
        Duration::milliseconds(2900),
        Duration::seconds(4),
    ]);

    let mut emitted = Vec::new();
    for lap in &laps {
        emitted.extend(aligner.align_lap(lap));
    }

    let with_hr: Vec<u8> = emitted
        .iter()
        .filter_map(|p| p.heart_rate.map(|r| r.value))
        .collect();
    assert_eq!(with_hr, heart_rate);
    assert_eq!(aligner.heart_rate_used(), 7);

    // Once exhausted, no later tick carries a heart rate
    let first_missing = emitted.iter().position(|p| p.heart_rate.is_none()).unwrap();
    assert!(emitted[first_missing..].iter().all(|p| p.heart_rate.is_none()));
}

#[test]
fn test_ticks_are_strictly_increasing_across_laps() {
    let samples = Samples::default();
    let gps = GpsIndex::default();
    let mut aligner = Aligner::new(&samples, &gps, 1);

    let laps = contiguous_laps(&[
        Duration::milliseconds(1500),
        Duration::milliseconds(1500),
        Duration::milliseconds(1500),
    ]);

    let times: Vec<_> = laps
        .iter()
        .flat_map(|lap| aligner.align_lap(lap))
        .map(|p| p.time)
        .collect();

    let expected: Vec<_> = (0..5).map(|s| start() + Duration::seconds(s)).collect();
    assert_eq!(times, expected);
}

#[test]
fn test_gps_near_miss_is_not_attached() {
    let samples = Samples::default();
    let t = start() + Duration::seconds(1);
    let gps = GpsIndex::new(vec![
        track_point(t + Duration::milliseconds(300)),
        track_point(start() + Duration::seconds(2)),
    ]);
    let mut aligner = Aligner::new(&samples, &gps, 1);

    let lap = Lap::whole_exercise(start(), Duration::seconds(3));
    let points = aligner.align_lap(&lap);

    assert!(points[1].position.is_none());
    assert!(points[2].position.is_some());
    assert_eq!(aligner.gps_assigned(), 1);
}

#[test]
fn test_leftover_samples_are_dropped() {
    let samples = samples(&[100; 20], &[2.5; 20]);
    let gps = GpsIndex::default();
    let mut aligner = Aligner::new(&samples, &gps, 1);

    let points = aligner.align_lap(&Lap::whole_exercise(start(), Duration::seconds(5)));

    assert_eq!(points.len(), 5);
    assert_eq!(aligner.heart_rate_used(), 5);
    assert_eq!(aligner.speed_used(), 5);
}
