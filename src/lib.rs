// gpxport - Workout route export to GPX
// Copyright (c) 2025 gpxport Contributors
// Licensed under the MIT License

//! # gpxport - Workout route export to GPX
//!
//! gpxport exports the recorded route of a fitness workout as a GPX 1.1
//! track file that mapping and analysis tools can read.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** a workout's route as a set of segments, paging through each
//!   segment's location batches concurrently
//! - **Merging** the segments into one sequence ordered by timestamp
//! - **Writing** a well-formed GPX document, streaming the header before the
//!   route is known
//! - **Exporting** to files with guaranteed release of the output sink
//!
//! ## Architecture
//!
//! gpxport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (route fetching, GPX writing, export)
//! - [`adapters`] - Health data store capability and the JSON archive store
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gpxport::config::load_config;
//! use gpxport::core::export::{ExportCoordinator, WorkoutSelection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("gpxport.toml")?;
//!     let coordinator = ExportCoordinator::from_config(&config)?;
//!
//!     let summary = coordinator.execute_export(&WorkoutSelection::All).await?;
//!
//!     println!("Exported {} workouts", summary.successful_exports);
//!     Ok(())
//! }
//! ```
//!
//! ## Exporting a single workout
//!
//! ```rust,no_run
//! use gpxport::adapters::archive::ArchiveStore;
//! use gpxport::adapters::store::{HealthStore, WorkoutFilter};
//! use gpxport::core::export::{ExportPipeline, FileSinkProvider};
//! use gpxport::core::gpx::DateFormats;
//! use gpxport::core::route::RouteFetcher;
//! use std::sync::Arc;
//!
//! # async fn example() -> gpxport::domain::Result<()> {
//! let store = Arc::new(ArchiveStore::new("health-archive.json", 500));
//! store.authorize().await?;
//!
//! let pipeline = ExportPipeline::new(
//!     RouteFetcher::new(store.clone()),
//!     FileSinkProvider::temp_dir(),
//!     DateFormats::utc(),
//! );
//!
//! if let Some(workout) = store.list_workouts(&WorkoutFilter::default()).await?.first() {
//!     if let Some(artifact) = pipeline.export(workout).await {
//!         println!("{} ({} points)", artifact.path.display(), artifact.point_count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! gpxport uses the [`domain::GpxportError`] type for all errors. Data store
//! failures are carried as [`domain::StoreError`]:
//!
//! ```rust
//! use gpxport::domain::{GpxportError, StoreError};
//!
//! let err: GpxportError = StoreError::AuthorizationDenied("read access refused".into()).into();
//! assert!(err.is_access_failure());
//! ```
//!
//! ## Logging
//!
//! gpxport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(workout_id = "7d44b88c-4199-4bad-97dc-d78268e01398", "Exporting workout");
//! warn!(segments = 0, "Workout has no route segments");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
