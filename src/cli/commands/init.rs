//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration file.

use super::{EXIT_CONFIGURATION, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "gpxport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing gpxport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIGURATION);
        }

        match fs::write(&self.output, starter_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point store.archive_path at your health archive");
                println!("  2. Validate configuration: gpxport validate-config");
                println!("  3. List workouts: gpxport list");
                println!("  4. Run export: gpxport export --latest 1");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Starter configuration with every setting at its default
pub fn starter_config() -> &'static str {
    r#"# gpxport Configuration File
# Workout route export to GPX 1.1

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[store]
# JSON health archive to read workouts and routes from
archive_path = "health-archive.json"

# Locations delivered per batch (1-10000)
batch_size = 500

[export]
# Directory GPX files are written to (defaults to the system temp dir)
# output_dir = "/tmp/gpx"

# Offset from UTC, in minutes, for track titles and file names
utc_offset_minutes = 0

[logging]
# JSON file logging
local_enabled = false
local_path = "./logs"

# Rotation: daily, hourly or never
local_rotation = "daily"
"#
}
