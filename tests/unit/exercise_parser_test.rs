//! Unit tests for Polar exercise parsing

use chrono::{Duration, NaiveDate};
use polar2tcx::polar::{parse_exercise, PolarError};

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<polar-exercise-data xmlns="http://www.polarpersonaltrainer.com" version="1.0">
  <calendar-items count="1">
    <exercise>
      <time>2013-05-04 17:12:41.0</time>
      <sport>Running</sport>
      <result>
        <duration>0:03:.5</duration>
        <recording-rate>1</recording-rate>
        <laps>
          <lap index="0"><duration>0:01:30.0</duration><distance>400</distance></lap>
          <lap index="1"><duration>0:02</duration></lap>
        </laps>
        <samples>
          <sample><type>heartrate</type><values>90, 91, 92</values></sample>
          <sample><type>Speed</type><values>11.2,11.4,11.9</values></sample>
        </samples>
      </result>
    </exercise>
  </calendar-items>
</polar-exercise-data>"#;

#[test]
fn test_parse_export() {
    let exercise = parse_exercise(EXPORT).unwrap();

    assert_eq!(
        exercise.start_local,
        NaiveDate::from_ymd_opt(2013, 5, 4)
            .unwrap()
            .and_hms_opt(17, 12, 41)
            .unwrap()
    );
    assert_eq!(
        exercise.duration,
        Duration::minutes(3) + Duration::milliseconds(500)
    );
    assert_eq!(exercise.laps.len(), 2);
    assert_eq!(exercise.laps[1].duration, Duration::minutes(2));
    assert_eq!(exercise.laps[0].distance.text, "400");

    let heart_rate: Vec<u8> = exercise.samples.heart_rate.iter().map(|r| r.value).collect();
    assert_eq!(heart_rate, vec![90, 91, 92]);
    let speed: Vec<f64> = exercise.samples.speed.iter().map(|r| r.value).collect();
    assert_eq!(speed, vec![11.2, 11.4, 11.9]);
}

#[test]
fn test_missing_exercise_is_fatal() {
    let result = parse_exercise("<polar-exercise-data></polar-exercise-data>");
    assert!(matches!(result, Err(PolarError::MissingElement("exercise"))));
}

#[test]
fn test_missing_recording_rate_is_fatal() {
    let doc = r#"<exercise>
  <time>2013-05-04 17:12:41.0</time>
  <result><duration>0:00:10</duration></result>
</exercise>"#;
    assert!(matches!(
        parse_exercise(doc),
        Err(PolarError::MissingElement("recording-rate"))
    ));
}

#[test]
fn test_non_numeric_sample_is_rejected() {
    let doc = r#"<exercise>
  <time>2013-05-04 17:12:41.0</time>
  <result>
    <duration>0:00:10</duration>
    <recording-rate>1</recording-rate>
    <samples><sample><type>HEARTRATE</type><values>90,x</values></sample></samples>
  </result>
</exercise>"#;
    assert!(matches!(
        parse_exercise(doc),
        Err(PolarError::InvalidValue { .. })
    ));
}
