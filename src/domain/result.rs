//! Result type alias for gpxport
//!
//! A convenient Result type alias that uses GpxportError as the error type.

use super::errors::GpxportError;

/// Result type alias for gpxport operations
///
/// # Examples
///
/// ```
/// use gpxport::domain::result::Result;
/// use gpxport::domain::errors::GpxportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(GpxportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, GpxportError>;
