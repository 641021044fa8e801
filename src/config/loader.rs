//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GpxportConfig;
use crate::domain::errors::GpxportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GpxportConfig
/// 4. Applies environment variable overrides (GPXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - An override has an unparseable value
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use gpxport::config::loader::load_config;
///
/// let config = load_config("gpxport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GpxportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GpxportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GpxportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file errors.
pub fn parse_config(contents: &str) -> Result<GpxportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GpxportConfig = toml::from_str(&contents)
        .map_err(|e| GpxportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GpxportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GpxportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    cap[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GpxportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads and parses one override variable
fn env_override<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|e| {
            GpxportError::Configuration(format!("Invalid value '{val}' for {name}: {e}"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using GPXPORT_* prefix
///
/// Environment variables follow the pattern: GPXPORT_<SECTION>_<KEY>
/// For example: GPXPORT_STORE_ARCHIVE_PATH, GPXPORT_EXPORT_OUTPUT_DIR
fn apply_env_overrides(config: &mut GpxportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("GPXPORT_APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    // Store overrides
    if let Some(val) = env_override("GPXPORT_STORE_ARCHIVE_PATH")? {
        config.store.archive_path = val;
    }
    if let Some(val) = env_override("GPXPORT_STORE_BATCH_SIZE")? {
        config.store.batch_size = val;
    }

    // Export overrides
    if let Some(val) = env_override("GPXPORT_EXPORT_OUTPUT_DIR")? {
        config.export.output_dir = Some(val);
    }
    if let Some(val) = env_override("GPXPORT_EXPORT_UTC_OFFSET_MINUTES")? {
        config.export.utc_offset_minutes = val;
    }

    // Logging overrides
    if let Some(val) = env_override("GPXPORT_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("GPXPORT_LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("GPXPORT_LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }

    Ok(())
}
