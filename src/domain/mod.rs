//! Domain models and types for gpxport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`WorkoutId`], [`RouteSegmentId`])
//! - **Domain models** ([`Workout`], [`RouteSegment`], [`LocationSample`], [`LocationBatch`])
//! - **Error types** ([`GpxportError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use gpxport::domain::{ActivityType, Workout, WorkoutId};
//! use chrono::Utc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workout = Workout::builder()
//!     .id(WorkoutId::random())
//!     .activity_type(ActivityType::Walking)
//!     .start_date(Utc::now())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod location;
pub mod result;
pub mod workout;

// Re-export commonly used types for convenience
pub use errors::{GpxportError, StoreError};
pub use ids::{RouteSegmentId, WorkoutId};
pub use location::{LocationBatch, LocationSample};
pub use result::Result;
pub use workout::{ActivityType, RouteSegment, Workout, WorkoutBuilder};
