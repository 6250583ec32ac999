//! TCX output for converted exercises.
//!
//! The document is streamed lap by lap: [`TcxWriter::begin`] writes the
//! header and opens the activity, [`TcxWriter::write_lap`] is called once per
//! aligned lap, and [`TcxWriter::finish`] closes every open element.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use super::ExportError;
use crate::convert::align::Trackpoint;
use crate::convert::laps::Lap;
use crate::convert::time::format_tcx_time;
use crate::polar::duration::total_seconds;
use crate::polar::Reading;

/// TCX XML namespaces
const NS_TCX: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
const NS_TPX: &str = "http://www.garmin.com/xmlschemas/ActivityExtension/v2";
const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2 http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd";

/// Streaming TCX document writer.
pub struct TcxWriter<W: Write> {
    writer: Writer<W>,
    include_heart_rate: bool,
}

impl<W: Write> TcxWriter<W> {
    /// `include_heart_rate` controls the lap-level heart-rate summary elements;
    /// pass `false` when the exercise has no heart-rate samples.
    pub fn new(inner: W, include_heart_rate: bool) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
            include_heart_rate,
        }
    }

    /// Write the XML declaration, root element and activity header.
    pub fn begin(&mut self, sport: &str, id: &DateTime<Utc>) -> Result<(), ExportError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;

        let mut root = BytesStart::new("TrainingCenterDatabase");
        root.push_attribute(("xmlns", NS_TCX));
        root.push_attribute(("xmlns:ns3", NS_TPX));
        root.push_attribute(("xmlns:xsi", NS_XSI));
        root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
        self.writer.write_event(Event::Start(root))?;

        self.start("Activities")?;

        let mut activity = BytesStart::new("Activity");
        activity.push_attribute(("Sport", sport));
        self.writer.write_event(Event::Start(activity))?;

        self.element("Id", &format_tcx_time(id))
    }

    /// Write one lap with its trackpoints.
    pub fn write_lap(&mut self, lap: &Lap, points: &[Trackpoint<'_>]) -> Result<(), ExportError> {
        let mut start = BytesStart::new("Lap");
        start.push_attribute(("StartTime", format_tcx_time(&lap.start).as_str()));
        self.writer.write_event(Event::Start(start))?;

        self.element(
            "TotalTimeSeconds",
            &total_seconds(lap.duration).to_string(),
        )?;
        self.element("DistanceMeters", &lap.distance.text)?;

        if self.include_heart_rate {
            self.heart_rate("AverageHeartRateBpm", &lap.avg_hr)?;
            self.heart_rate("MaximumHeartRateBpm", &lap.max_hr)?;
        }

        self.start("Track")?;
        for point in points {
            self.trackpoint(point)?;
        }
        self.end("Track")?;

        self.end("Lap")
    }

    /// Close the document and hand back the underlying writer, flushed.
    pub fn finish(mut self) -> Result<W, ExportError> {
        self.end("Activity")?;
        self.end("Activities")?;
        self.end("TrainingCenterDatabase")?;

        let mut inner = self.writer.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    fn trackpoint(&mut self, point: &Trackpoint<'_>) -> Result<(), ExportError> {
        self.start("Trackpoint")?;
        self.element("Time", &format_tcx_time(&point.time))?;

        if let Some(position) = point.position {
            self.start("Position")?;
            self.element("LatitudeDegrees", &position.latitude.to_string())?;
            self.element("LongitudeDegrees", &position.longitude.to_string())?;
            self.end("Position")?;

            if let Some(elevation) = position.elevation {
                self.element("AltitudeMeters", &elevation.to_string())?;
            }
        }

        if let Some(hr) = point.heart_rate {
            self.heart_rate("HeartRateBpm", hr)?;
        }

        // Speed lives in the ActivityExtension namespace
        if let Some(speed) = point.speed {
            self.start("Extensions")?;
            self.start("ns3:TPX")?;
            self.element("ns3:Speed", &speed.text)?;
            self.end("ns3:TPX")?;
            self.end("Extensions")?;
        }

        self.end("Trackpoint")
    }

    /// Heart rate element with a `Value` child.
    fn heart_rate(&mut self, name: &str, value: &Reading<u8>) -> Result<(), ExportError> {
        self.start(name)?;
        self.element("Value", &value.text)?;
        self.end(name)
    }

    /// Simple element with text content.
    fn element(&mut self, name: &str, value: &str) -> Result<(), ExportError> {
        self.start(name)?;
        self.writer.write_event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn start(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

/// Create the output file, refusing to replace an existing one.
pub fn create_output(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => ExportError::OutputExists(path.to_path_buf()),
            _ => ExportError::IoError(e),
        })?;
    Ok(BufWriter::new(file))
}

/// Generate a default output filename from the current date and time.
pub fn generate_tcx_filename(prefix: &str, now: &DateTime<chrono::Local>) -> String {
    format!("{}{}.tcx", prefix, now.format("%Y%m%d_%H%M%S"))
}
