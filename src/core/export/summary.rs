//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::pipeline::Artifact;
use crate::domain::{GpxportError, StoreError, WorkoutId};
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Number of workouts selected for export
    pub total_workouts: usize,

    /// Number of GPX documents written
    pub successful_exports: usize,

    /// Number of workouts that produced no artifact
    pub failed_exports: usize,

    /// Number of exported workouts whose route had no points
    pub empty_routes: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,

    /// Artifacts written, in export order
    pub artifacts: Vec<Artifact>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            total_workouts: 0,
            successful_exports: 0,
            failed_exports: 0,
            empty_routes: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Record a written artifact
    pub fn record_artifact(&mut self, artifact: Artifact) {
        self.successful_exports += 1;
        if artifact.point_count == 0 {
            self.empty_routes += 1;
        }
        self.artifacts.push(artifact);
    }

    /// Record a workout that produced no artifact
    pub fn record_failure(&mut self, workout_id: &WorkoutId, error: &GpxportError) {
        self.failed_exports += 1;
        self.add_error(
            ExportError::new(ExportErrorType::from(error), error.to_string())
                .with_context(format!("workout_id={workout_id}")),
        );
    }

    /// Total track points across all artifacts
    pub fn total_points(&self) -> usize {
        self.artifacts.iter().map(|a| a.point_count).sum()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed_exports == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_workouts == 0 {
            return 100.0;
        }
        (self.successful_exports as f64 / self.total_workouts as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_workouts = self.total_workouts,
            successful = self.successful_exports,
            failed = self.failed_exports,
            empty_routes = self.empty_routes,
            points = self.total_points(),
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Data store unavailable or read access refused
    Access,
    /// Workout, segment or location query failed
    Query,
    /// Requested workout does not exist
    NotFound,
    /// Output sink could not be acquired, written or released
    Io,
    /// Stored data could not be decoded or was invalid
    Data,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl From<&GpxportError> for ExportErrorType {
    fn from(error: &GpxportError) -> Self {
        match error {
            GpxportError::Store(StoreError::DataUnavailable(_))
            | GpxportError::Store(StoreError::AuthorizationDenied(_)) => Self::Access,
            GpxportError::Store(StoreError::WorkoutNotFound(_)) => Self::NotFound,
            GpxportError::Store(_) => Self::Query,
            GpxportError::Io(_) => Self::Io,
            GpxportError::Serialization(_) | GpxportError::Validation(_) => Self::Data,
            GpxportError::Configuration(_) => Self::Configuration,
            GpxportError::Other(_) => Self::Unknown,
        }
    }
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., workout ID)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
