//! Result type alias for the anonymizer

use super::errors::AnonymizerError;

/// Result type alias for anonymizer operations
///
/// # Examples
///
/// ```
/// use pii_anonymizer::domain::result::Result;
/// use pii_anonymizer::domain::errors::AnonymizerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AnonymizerError::InvalidInput("not a number".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonymizerError>;
