//! Result type alias for the bootstrap subsystem

use super::errors::BootstrapError;

/// Result type alias for bootstrap operations
///
/// # Examples
///
/// ```
/// use emr_bootstrap::domain::result::Result;
/// use emr_bootstrap::domain::errors::BootstrapError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BootstrapError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BootstrapError>;
