//! Domain error types
//!
//! This module defines the error hierarchy for the anonymizer.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main anonymizer error type
///
/// Configuration errors ([`InvalidConfig`](Self::InvalidConfig),
/// [`InvalidDistribution`](Self::InvalidDistribution), [`Configuration`](Self::Configuration))
/// are raised while building mechanisms and block construction of an
/// [`Anonymizer`](crate::anonymization::Anonymizer). The remaining variants surface per item
/// and never abort other items of a batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnonymizerError {
    /// Bad mechanism parameter shape or combination
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Randomized response input outside its value universe and no default value
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Input that a mechanism or encoder cannot handle
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Decode called with a context that lacks required keys
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    /// Date or time string not recognized
    #[error("Parse error: {0}")]
    Parse(String),

    /// Probability weights that cannot form a distribution
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Settings file loading errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnonymizerError {
    /// Whether the error belongs to a single item rather than to the configuration
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_) | Self::InvalidInput(_) | Self::InvalidContext(_) | Self::Parse(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AnonymizerError {
    fn from(err: std::io::Error) -> Self {
        AnonymizerError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AnonymizerError {
    fn from(err: serde_json::Error) -> Self {
        AnonymizerError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AnonymizerError {
    fn from(err: toml::de::Error) -> Self {
        AnonymizerError::Configuration(format!("TOML parse error: {err}"))
    }
}
