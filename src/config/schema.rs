//! Configuration schema types
//!
//! This module defines the structure of the settings file read by the binary.

use crate::anonymization::AnonymizerConfig;
use crate::domain::{AnonymizerError, Result};
use serde::{Deserialize, Serialize};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Root of the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mechanisms per tag
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,
}

impl Settings {
    /// Validates every section
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::Configuration`] for logging problems and
    /// [`AnonymizerError::InvalidConfig`] for mechanism problems.
    pub fn validate(&self) -> Result<()> {
        self.logging
            .validate()
            .map_err(AnonymizerError::Configuration)?;
        self.anonymizer.validate()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write console logs as JSON instead of human-readable text
    #[serde(default)]
    pub json: bool,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if !VALID_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                VALID_ROTATIONS.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when file logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
