//! Health data store abstraction
//!
//! This module defines the capability the exporter consumes: listing workouts,
//! listing a workout's route segments, and subscribing to location batches.

pub mod traits;

pub use traits::{HealthStore, LocationBatchStream, WorkoutFilter};
