//! CLI command implementations
//!
//! Commands return the process exit code:
//! 0 success, 1 some exports failed, 2 configuration error,
//! 3 data store unavailable or access denied, 5 fatal error.

pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::domain::GpxportError;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one workout could not be exported
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIGURATION: i32 = 2;
/// Exit code when the data store cannot be used
pub const EXIT_STORE_ACCESS: i32 = 3;
/// Exit code for any other failure
pub const EXIT_FATAL: i32 = 5;

/// Exit code for an error that ends a command
pub fn exit_code_for(error: &GpxportError) -> i32 {
    match error {
        GpxportError::Configuration(_) => EXIT_CONFIGURATION,
        e if e.is_access_failure() => EXIT_STORE_ACCESS,
        _ => EXIT_FATAL,
    }
}
