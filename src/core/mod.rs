//! Core business logic for gpxport.
//!
//! # Modules
//!
//! - [`route`] - Route fetching with per-segment fan-out and an ordered fan-in
//! - [`gpx`] - GPX 1.1 document writing and name/date formatting
//! - [`export`] - Export pipeline, output sinks, coordination and summaries
//!
//! # Export Workflow
//!
//! 1. **Authorize**: Request read access from the health store
//! 2. **Select**: List workouts and pick the ones to export
//! 3. **Open sink**: Derive the file name and replace any existing artifact
//! 4. **Header**: Write the GPX header from workout metadata
//! 5. **Fetch**: Drain every route segment concurrently and sort by time
//! 6. **Points**: Write the track points and the footer, then release the sink
//! 7. **Report**: Generate the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use gpxport::config::load_config;
//! use gpxport::core::export::{ExportCoordinator, WorkoutSelection};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gpxport.toml")?;
//! let coordinator = ExportCoordinator::from_config(&config)?;
//!
//! let summary = coordinator
//!     .execute_export(&WorkoutSelection::Latest(5))
//!     .await?;
//!
//! println!("Exported: {}", summary.successful_exports);
//! println!("Failed: {}", summary.failed_exports);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod gpx;
pub mod route;
