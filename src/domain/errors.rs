//! Domain error types
//!
//! This module defines the error hierarchy for gpxport.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main gpxport error type
///
/// This is the primary error type used throughout the library.
/// It wraps the data-store errors and adds the local failure classes.
#[derive(Debug, Error)]
pub enum GpxportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Health data store errors
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors (sink acquisition, write or release)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl GpxportError {
    /// Returns true when the failure means the data store cannot be used at all
    /// (not accessible, or read permission refused)
    pub fn is_access_failure(&self) -> bool {
        matches!(
            self,
            GpxportError::Store(StoreError::DataUnavailable(_))
                | GpxportError::Store(StoreError::AuthorizationDenied(_))
        )
    }
}

/// Health data store errors
///
/// Failures reported by the external store that provides workouts,
/// route segments and location batches.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is not accessible on this platform or session
    #[error("Health data is not available: {0}")]
    DataUnavailable(String),

    /// Read permission was not granted
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Listing workouts failed
    #[error("Workout query failed: {0}")]
    WorkoutQueryFailed(String),

    /// Listing the route segments of a workout failed
    #[error("Route segment query failed: {0}")]
    SegmentQueryFailed(String),

    /// A segment's location subscription delivered an error
    #[error("Location query failed for segment {segment}: {message}")]
    LocationQueryFailed { segment: String, message: String },

    /// Requested workout does not exist in the store
    #[error("Workout not found: {0}")]
    WorkoutNotFound(String),
}

impl StoreError {
    /// Creates a location query failure for a segment
    pub fn location(segment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LocationQueryFailed {
            segment: segment.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for GpxportError {
    fn from(err: std::io::Error) -> Self {
        GpxportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for GpxportError {
    fn from(err: serde_json::Error) -> Self {
        GpxportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GpxportError {
    fn from(err: toml::de::Error) -> Self {
        GpxportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpxport_error_display() {
        let err = GpxportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::SegmentQueryFailed("timeout".to_string());
        let err: GpxportError = store_err.into();
        assert!(matches!(
            err,
            GpxportError::Store(StoreError::SegmentQueryFailed(_))
        ));
    }

    #[test]
    fn test_location_error_display() {
        let err = StoreError::location("route-2", "stream closed");
        assert_eq!(
            err.to_string(),
            "Location query failed for segment route-2: stream closed"
        );
    }

    #[test]
    fn test_access_failure_classification() {
        let unavailable: GpxportError = StoreError::DataUnavailable("no archive".into()).into();
        let denied: GpxportError = StoreError::AuthorizationDenied("read".into()).into();
        let segment: GpxportError = StoreError::SegmentQueryFailed("boom".into()).into();

        assert!(unavailable.is_access_failure());
        assert!(denied.is_access_failure());
        assert!(!segment.is_access_failure());
        assert!(!GpxportError::Io("disk full".into()).is_access_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GpxportError = io_err.into();
        assert!(matches!(err, GpxportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GpxportError = json_err.into();
        assert!(matches!(err, GpxportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GpxportError = toml_err.into();
        assert!(matches!(err, GpxportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = GpxportError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;

        let err = StoreError::DataUnavailable("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
