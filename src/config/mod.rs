//! Configuration management for gpxport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! gpxport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GPXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation of every section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gpxport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("gpxport.toml")?;
//!
//! println!("Archive: {}", config.store.archive_path.display());
//! println!("Batch size: {}", config.store.batch_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`StoreConfig`] - Health archive location and batch size
//! - [`ExportConfig`] - Output directory and UTC offset for names
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! archive_path = "${HOME}/health/archive.json"
//! batch_size = 500
//!
//! [export]
//! output_dir = "/tmp/gpx"
//! utc_offset_minutes = 120
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, ExportConfig, GpxportConfig, LoggingConfig, StoreConfig};
