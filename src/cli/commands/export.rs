//! Export command implementation
//!
//! This module implements the `export` command for writing workout routes
//! as GPX files.

use super::{exit_code_for, EXIT_PARTIAL_FAILURE, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, WorkoutSelection};
use crate::domain::WorkoutId;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export only these workouts (repeatable)
    #[arg(long, value_name = "UUID", conflicts_with = "latest")]
    pub id: Vec<WorkoutId>,

    /// Export only the N most recently ended workouts
    #[arg(long, value_name = "N")]
    pub latest: Option<usize>,

    /// Override the output directory
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl ExportArgs {
    /// Workouts selected by the arguments
    pub fn selection(&self) -> WorkoutSelection {
        if !self.id.is_empty() {
            WorkoutSelection::Ids(self.id.clone())
        } else if let Some(n) = self.latest {
            WorkoutSelection::Latest(n)
        } else {
            WorkoutSelection::All
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir.display(), "Overriding output directory from CLI");
            config.export.output_dir = Some(dir.clone());
        }

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🚀 Starting export...");
        println!(
            "  Output directory: {}",
            coordinator.pipeline().provider().directory().display()
        );
        println!();

        let summary = match coordinator.execute_export(&self.selection()).await {
            Ok(s) => s,
            Err(e) => {
                crate::log_error_with_context!(&e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if !summary.artifacts.is_empty() {
            println!("📁 Files written:");
            for artifact in &summary.artifacts {
                println!(
                    "  {} ({} points)",
                    artifact.path.display(),
                    artifact.point_count
                );
            }
            println!();
        }

        println!("📊 Export Summary:");
        println!("  Total Workouts: {}", summary.total_workouts);
        println!("  Successful: {}", summary.successful_exports);
        println!("  Failed: {}", summary.failed_exports);
        println!("  Empty Routes: {}", summary.empty_routes);
        println!("  Track Points: {}", summary.total_points());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            EXIT_SUCCESS
        } else {
            println!("⚠️  Export completed with failures");
            EXIT_PARTIAL_FAILURE
        };

        Ok(exit_code)
    }
}
