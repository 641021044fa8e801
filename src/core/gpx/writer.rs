//! Streaming GPX 1.1 writer
//!
//! The header only needs workout metadata, so it is written as soon as the
//! writer is created; track points follow as they become available and the
//! footer is written by [`GpxWriter::finish`].

use super::format::{iso8601, DateFormats};
use crate::domain::{LocationSample, Workout};
use std::io::{self, Write};

/// Value of the `creator` attribute on the root element
pub const GPX_CREATOR: &str = "Apple Workouts";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const GPX_OPEN: &str = concat!(
    r#"<gpx version="1.1" creator="Apple Workouts""#,
    r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#,
    r#" xmlns="http://www.topografix.com/GPX/1/1""#,
    r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd""#,
    r#" xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">"#,
);

/// Wraps text in a CDATA section
///
/// A `]]>` inside the text would end the section early, so it is split
/// across two sections. The literal text is preserved for any reader.
///
/// ```
/// use gpxport::core::gpx::writer::cdata;
///
/// assert_eq!(cdata("Run - 1"), "<![CDATA[Run - 1]]>");
/// assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
/// ```
pub fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

/// GPX document being written to a sink
///
/// Exactly one `<trk>` with one `<trkseg>` is produced. Dropping the writer
/// without calling [`finish`](Self::finish) abandons the document.
///
/// # Example
///
/// ```
/// use gpxport::core::gpx::{DateFormats, GpxWriter};
/// use gpxport::domain::{ActivityType, LocationSample, Workout, WorkoutId};
/// use chrono::{TimeZone, Utc};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();
/// let workout = Workout::builder()
///     .id(WorkoutId::random())
///     .activity_type(ActivityType::Running)
///     .start_date(start)
///     .build()?;
///
/// let mut writer = GpxWriter::begin(Vec::new(), &workout, &DateFormats::utc())?;
/// writer.write_point(&LocationSample::new(51.5, -0.12, 11.0, start))?;
/// let bytes = writer.finish()?;
///
/// let text = String::from_utf8(bytes)?;
/// assert!(text.contains(r#"<trkpt lat="51.5" lon="-0.12">"#));
/// # Ok(())
/// # }
/// ```
pub struct GpxWriter<W: Write> {
    sink: W,
    points: usize,
}

impl<W: Write> GpxWriter<W> {
    /// Writes the document header and opens the track segment
    pub fn begin(mut sink: W, workout: &Workout, formats: &DateFormats) -> io::Result<Self> {
        let title = formats.track_title(workout);

        writeln!(sink, "{XML_DECLARATION}")?;
        writeln!(sink, "{GPX_OPEN}")?;
        writeln!(sink, "  <trk>")?;
        writeln!(sink, "    <name>{}</name>", cdata(&title))?;
        writeln!(sink, "    <time>{}</time>", iso8601(&workout.start_date))?;
        write!(sink, "    <trkseg>")?;

        Ok(Self { sink, points: 0 })
    }

    /// Writes one track point
    ///
    /// Coordinates are written as given, with no range checks. Elevation is
    /// the magnitude of the altitude: the sign is dropped.
    pub fn write_point(&mut self, location: &LocationSample) -> io::Result<()> {
        write!(
            self.sink,
            "\n      <trkpt lat=\"{}\" lon=\"{}\">\n        <ele>{}</ele>\n        <time>{}</time>\n      </trkpt>",
            location.latitude,
            location.longitude,
            location.altitude_meters.abs(),
            iso8601(&location.timestamp),
        )?;
        self.points += 1;
        Ok(())
    }

    /// Writes every point in order
    pub fn write_points<'a, I>(&mut self, locations: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a LocationSample>,
    {
        for location in locations {
            self.write_point(location)?;
        }
        Ok(())
    }

    /// Number of track points written so far
    pub fn points_written(&self) -> usize {
        self.points
    }

    /// Closes the segment, track and document, flushes, and hands back the sink
    pub fn finish(mut self) -> io::Result<W> {
        if self.points > 0 {
            write!(self.sink, "\n    ")?;
        }
        writeln!(self.sink, "</trkseg>")?;
        writeln!(self.sink, "  </trk>")?;
        writeln!(self.sink, "</gpx>")?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Writes a complete document for already-ordered locations
pub fn write_document<W: Write>(
    sink: W,
    workout: &Workout,
    locations: &[LocationSample],
    formats: &DateFormats,
) -> io::Result<W> {
    let mut writer = GpxWriter::begin(sink, workout, formats)?;
    writer.write_points(locations)?;
    writer.finish()
}
