//! Unit tests for lap placement

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use polar2tcx::convert::laps::{build_laps, Lap};
use polar2tcx::polar::{Exercise, LapDefinition, Reading, Samples};

fn exercise(laps: Vec<LapDefinition>) -> Exercise {
    Exercise {
        start_local: NaiveDate::from_ymd_opt(2021, 3, 14)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap(),
        name: String::new(),
        sport: "Running".to_string(),
        duration: Duration::seconds(1800),
        recording_rate: 5,
        avg_hr: 140,
        max_hr: 181,
        laps,
        samples: Samples::default(),
    }
}

#[test]
fn test_lap_starts_accumulate_durations() {
    let start = Utc.with_ymd_and_hms(2021, 3, 14, 6, 30, 0).unwrap();
    let durations: Vec<Duration> = (1..=6)
        .map(|i| Duration::seconds(i * 97) + Duration::microseconds(i * 123_457))
        .collect();
    let definitions = durations
        .iter()
        .enumerate()
        .map(|(i, d)| LapDefinition {
            index: i as u32,
            duration: *d,
            distance: Reading::from(0.0),
            avg_hr: Reading::from(0),
            max_hr: Reading::from(0),
        })
        .collect();

    let laps = build_laps(&exercise(definitions), start);

    assert_eq!(laps.len(), durations.len());
    assert_eq!(laps[0].start, start);
    for i in 0..laps.len() - 1 {
        assert_eq!(laps[i + 1].start, laps[i].start + durations[i]);
    }
    let total: Duration = durations.iter().fold(Duration::zero(), |acc, d| acc + *d);
    assert_eq!(laps.last().unwrap().end(), start + total);
}

#[test]
fn test_exercise_without_laps_gets_one_lap() {
    let start = Utc.with_ymd_and_hms(2021, 3, 14, 6, 30, 0).unwrap();

    let laps = build_laps(&exercise(Vec::new()), start);

    assert_eq!(
        laps,
        vec![Lap::whole_exercise(start, Duration::seconds(1800))]
    );
    // Exercise stats are not copied onto the synthetic lap
    assert_eq!(laps[0].avg_hr.value, 0);
    assert_eq!(laps[0].max_hr.value, 0);
}
