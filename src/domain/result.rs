//! Result type alias for Vaxdesk
//!
//! This module provides a convenient Result type alias that uses VaxdeskError
//! as the error type.

use super::errors::VaxdeskError;

/// Result type alias for Vaxdesk operations
///
/// # Examples
///
/// ```
/// use vaxdesk::domain::result::Result;
/// use vaxdesk::domain::errors::VaxdeskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VaxdeskError::Configuration("missing base_url".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VaxdeskError>;
