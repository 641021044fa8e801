//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for gpxport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// gpxport - Workout route export to GPX
#[derive(Parser, Debug)]
#[command(name = "gpxport")]
#[command(version, about, long_about = None)]
#[command(author = "gpxport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gpxport.toml", env = "GPXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GPXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List exportable workouts
    List(commands::list::ListArgs),

    /// Export workout routes as GPX files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
