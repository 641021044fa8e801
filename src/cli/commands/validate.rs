//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the gpxport configuration file.

use super::{EXIT_CONFIGURATION, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates every section
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Archive: {}", config.store.archive_path.display());
        println!("  Batch Size: {}", config.store.batch_size);
        match &config.export.output_dir {
            Some(dir) => println!("  Output Directory: {}", dir.display()),
            None => println!(
                "  Output Directory: {} (system temp)",
                std::env::temp_dir().display()
            ),
        }
        println!("  UTC Offset: {} minutes", config.export.utc_offset_minutes);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
