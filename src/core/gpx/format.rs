//! Text formatting for titles, file names and timestamps
//!
//! All formatting is done by pure functions over an explicit [`DateFormats`]
//! value, so nothing here depends on process-wide state.

use crate::domain::Workout;
use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};
use std::time::Duration;

/// ISO-8601 timestamp, UTC, seconds precision, `Z` suffix
///
/// Used for the track time and for every track point.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use gpxport::core::gpx::format::iso8601;
///
/// let t = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();
/// assert_eq!(iso8601(&t), "2024-05-01T07:30:00Z");
/// ```
pub fn iso8601(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Date formatting for human-facing names
///
/// Titles and file names render the workout start in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormats {
    offset: FixedOffset,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateFormats {
    /// Render names in UTC
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Render names in a fixed offset from UTC
    ///
    /// Returns `None` when the offset is a day or more.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
    }

    /// The configured offset
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// `2024-05-01 07:30:00`
    pub fn title_date(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// `2024-05-01_07-30-00`
    pub fn file_date(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format("%Y-%m-%d_%H-%M-%S")
            .to_string()
    }

    /// Track title, `"<Label> - <start date>"`
    pub fn track_title(&self, workout: &Workout) -> String {
        format!(
            "{} - {}",
            workout.activity_type.label(),
            self.title_date(&workout.start_date)
        )
    }

    /// Output file name, `"<compact start date>_<Label>.gpx"`
    pub fn file_name(&self, workout: &Workout) -> String {
        format!(
            "{}_{}.gpx",
            self.file_date(&workout.start_date),
            workout.activity_type.label()
        )
    }
}

/// Abbreviated duration for listings: `1h 5m`, `2d 3h`, `42s`
///
/// At most two units are shown, counted from the largest non-zero unit;
/// a zero unit inside that window is skipped.
pub fn abbreviated_duration(duration: Duration) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

    let mut remaining = duration.as_secs();
    let mut parts = Vec::with_capacity(2);
    let mut window = 0;

    for (size, suffix) in UNITS {
        let value = remaining / size;
        remaining %= size;
        if value == 0 && parts.is_empty() {
            continue;
        }
        window += 1;
        if value > 0 {
            parts.push(format!("{value}{suffix}"));
        }
        if window == 2 {
            break;
        }
    }

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
