//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers handed out by the health data store.
//! Each type keeps workout and route-segment identifiers from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Workout identifier newtype wrapper
///
/// Health stores identify workouts by UUID.
///
/// # Examples
///
/// ```
/// use gpxport::domain::ids::WorkoutId;
/// use std::str::FromStr;
///
/// let id = WorkoutId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(Uuid);

impl WorkoutId {
    /// Wraps an existing UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkoutId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid workout ID '{s}': {e}"))
    }
}

impl From<Uuid> for WorkoutId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Route segment identifier newtype wrapper
///
/// Opaque to the exporter; only used to subscribe to a segment's location batches.
///
/// # Examples
///
/// ```
/// use gpxport::domain::ids::RouteSegmentId;
///
/// let id = RouteSegmentId::new("route-1").unwrap();
/// assert_eq!(id.as_str(), "route-1");
/// assert!(RouteSegmentId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteSegmentId(String);

impl RouteSegmentId {
    /// Creates a new RouteSegmentId, rejecting blank identifiers
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Route segment ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the segment ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RouteSegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RouteSegmentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RouteSegmentId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RouteSegmentId> for String {
    fn from(id: RouteSegmentId) -> Self {
        id.0
    }
}

impl AsRef<str> for RouteSegmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
