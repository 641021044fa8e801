//! List command implementation
//!
//! This module implements the `list` command, which shows the workouts
//! that can be exported, most recently ended first.

use super::{exit_code_for, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::core::gpx::abbreviated_duration;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many workouts
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Listing workouts");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let workouts = match coordinator.list_workouts(self.limit).await {
            Ok(w) => w,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to list workouts");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if workouts.is_empty() {
            println!("No workouts found in {}", config.store.archive_path.display());
            return Ok(EXIT_SUCCESS);
        }

        let formats = coordinator.pipeline().formats();
        println!("📋 Workouts ({}):", workouts.len());
        for workout in &workouts {
            println!(
                "  {:<8} {}  {:>8}  {}",
                workout.activity_type.label(),
                formats.title_date(&workout.start_date),
                abbreviated_duration(workout.duration),
                workout.id
            );
        }

        Ok(EXIT_SUCCESS)
    }
}
