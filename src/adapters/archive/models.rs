//! Health archive file models
//!
//! Serde models for the JSON archive read by [`super::ArchiveStore`]:
//!
//! ```json
//! {
//!   "workouts": [
//!     {
//!       "id": "7d44b88c-4199-4bad-97dc-d78268e01398",
//!       "activity_type": "cycling",
//!       "start_date": "2024-05-01T07:30:00Z",
//!       "duration_secs": 3600.0,
//!       "routes": [
//!         {
//!           "id": "route-1",
//!           "start_date": "2024-05-01T07:30:00Z",
//!           "locations": [
//!             { "latitude": 51.5, "longitude": -0.12, "altitude": 12.0,
//!               "timestamp": "2024-05-01T07:30:01Z" }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::domain::{
    ActivityType, GpxportError, LocationSample, Result, RouteSegment, RouteSegmentId, Workout,
    WorkoutId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root of an archive file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthArchive {
    #[serde(default)]
    pub workouts: Vec<ArchivedWorkout>,
}

/// A workout as stored in the archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedWorkout {
    pub id: WorkoutId,
    pub activity_type: ActivityType,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub routes: Vec<ArchivedRoute>,
}

/// A route segment and its recorded locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedRoute {
    pub id: RouteSegmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locations: Vec<LocationSample>,
}

impl ArchivedWorkout {
    /// Converts to the domain workout
    ///
    /// # Errors
    ///
    /// Returns a validation error for a negative or non-finite duration.
    pub fn to_workout(&self) -> Result<Workout> {
        let duration = Duration::try_from_secs_f64(self.duration_secs).map_err(|e| {
            GpxportError::Validation(format!(
                "Invalid duration {} for workout {}: {e}",
                self.duration_secs, self.id
            ))
        })?;

        Workout::builder()
            .id(self.id)
            .activity_type(self.activity_type)
            .start_date(self.start_date)
            .duration(duration)
            .build()
            .map_err(GpxportError::Validation)
    }
}

impl ArchivedRoute {
    /// Converts to the domain route segment (without its locations)
    pub fn to_segment(&self) -> RouteSegment {
        let segment = RouteSegment::new(self.id.clone());
        match self.start_date {
            Some(start) => segment.with_start_date(start),
            None => segment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE: &str = r#"{
        "workouts": [
            {
                "id": "7d44b88c-4199-4bad-97dc-d78268e01398",
                "activity_type": "running",
                "start_date": "2024-05-01T07:30:00Z",
                "duration_secs": 1800.5,
                "routes": [
                    {
                        "id": "route-1",
                        "locations": [
                            {"latitude": 1.0, "longitude": 2.0, "altitude": -4.0,
                             "timestamp": "2024-05-01T07:30:01Z"}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_archive() {
        let archive: HealthArchive = serde_json::from_str(ARCHIVE).unwrap();
        assert_eq!(archive.workouts.len(), 1);
        assert_eq!(archive.workouts[0].routes[0].locations.len(), 1);
    }

    #[test]
    fn test_to_workout() {
        let archive: HealthArchive = serde_json::from_str(ARCHIVE).unwrap();
        let workout = archive.workouts[0].to_workout().unwrap();
        assert_eq!(workout.activity_type, ActivityType::Running);
        assert_eq!(workout.duration, Duration::from_millis(1_800_500));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut archive: HealthArchive = serde_json::from_str(ARCHIVE).unwrap();
        archive.workouts[0].duration_secs = -1.0;
        let err = archive.workouts[0].to_workout().unwrap_err();
        assert!(matches!(err, GpxportError::Validation(_)));
    }

    #[test]
    fn test_empty_archive() {
        let archive: HealthArchive = serde_json::from_str("{}").unwrap();
        assert!(archive.workouts.is_empty());
    }
}
