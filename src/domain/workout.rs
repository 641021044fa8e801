//! Workout domain model
//!
//! Workouts and route segments are owned by the health data store and are
//! read-only to the exporter.

use super::ids::{RouteSegmentId, WorkoutId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Kind of activity a workout recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Cycling,
    Running,
    Walking,
    Swimming,
    #[serde(other)]
    Other,
}

impl ActivityType {
    /// Short label used in track titles and file names
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Cycling => "Cycle",
            ActivityType::Running => "Run",
            ActivityType::Walking => "Walk",
            _ => "Workout",
        }
    }

    /// Lowercase identifier, as used in configuration and archives
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Cycling => "cycling",
            ActivityType::Running => "running",
            ActivityType::Walking => "walking",
            ActivityType::Swimming => "swimming",
            ActivityType::Other => "other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cycling" => Ok(ActivityType::Cycling),
            "running" => Ok(ActivityType::Running),
            "walking" => Ok(ActivityType::Walking),
            "swimming" => Ok(ActivityType::Swimming),
            "other" => Ok(ActivityType::Other),
            _ => Err(format!(
                "Invalid activity type '{s}'. Must be one of: cycling, running, walking, swimming, other"
            )),
        }
    }
}

/// A recorded workout
///
/// # Examples
///
/// ```
/// use gpxport::domain::workout::{ActivityType, WorkoutBuilder};
/// use gpxport::domain::ids::WorkoutId;
/// use chrono::{TimeZone, Utc};
/// use std::time::Duration;
///
/// let workout = WorkoutBuilder::new()
///     .id(WorkoutId::random())
///     .activity_type(ActivityType::Cycling)
///     .start_date(Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap())
///     .duration(Duration::from_secs(3600))
///     .build()
///     .unwrap();
///
/// assert_eq!(workout.activity_type.label(), "Cycle");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    /// Store identifier
    pub id: WorkoutId,

    /// Kind of activity
    pub activity_type: ActivityType,

    /// Instant the workout started
    pub start_date: DateTime<Utc>,

    /// Elapsed time of the workout
    pub duration: Duration,
}

impl Workout {
    /// Creates a new builder for constructing a Workout
    pub fn builder() -> WorkoutBuilder {
        WorkoutBuilder::default()
    }

    /// Instant the workout ended (start + duration)
    pub fn end_date(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.duration)
            .ok()
            .and_then(|d| self.start_date.checked_add_signed(d))
            .unwrap_or(self.start_date)
    }
}

/// Builder for constructing Workout instances
#[derive(Debug, Default)]
pub struct WorkoutBuilder {
    id: Option<WorkoutId>,
    activity_type: Option<ActivityType>,
    start_date: Option<DateTime<Utc>>,
    duration: Option<Duration>,
}

impl WorkoutBuilder {
    /// Creates a new WorkoutBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workout ID
    pub fn id(mut self, id: WorkoutId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the activity type
    pub fn activity_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    /// Sets the start instant
    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the duration
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builds the Workout
    ///
    /// Activity type defaults to `Other` and duration to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or start date is missing
    pub fn build(self) -> Result<Workout, String> {
        Ok(Workout {
            id: self.id.ok_or("id is required")?,
            activity_type: self.activity_type.unwrap_or(ActivityType::Other),
            start_date: self.start_date.ok_or("start_date is required")?,
            duration: self.duration.unwrap_or_default(),
        })
    }
}

/// One contiguous chunk of recorded path belonging to a workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSegment {
    /// Opaque segment identifier
    pub id: RouteSegmentId,

    /// Start of the recorded chunk, when the store knows it
    pub start_date: Option<DateTime<Utc>>,
}

impl RouteSegment {
    /// Creates a segment without a known start date
    pub fn new(id: RouteSegmentId) -> Self {
        Self {
            id,
            start_date: None,
        }
    }

    /// Sets the start date
    pub fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }
}
