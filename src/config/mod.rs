//! Configuration management for the anonymizer binary.
//!
//! Settings are read from a TOML file (or JSON, for files ending in `.json`) with
//! support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Validation of every configured mechanism before anything is built
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pii_anonymizer::anonymization::Anonymizer;
//! use pii_anonymizer::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = load_config("pii-anonymizer.toml")?;
//! let anonymizer = Anonymizer::new(&settings.anonymizer)?;
//! println!("Configured tags: {:?}", anonymizer.tags());
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [anonymizer.default_mechanism]
//! mechanism = "suppression"
//! char = "X"
//!
//! [anonymizer.mechanisms_by_tag.PER]
//! mechanism = "pseudonymization"
//! format = "${PERSON_LABEL} {}"
//! stateful = true
//!
//! [anonymizer.mechanisms_by_tag.DATE]
//! mechanism = "laplaceNoise"
//! epsilon = 0.0001
//! sensitivity = 86400
//! encoder = "datetime"
//! ```
//!
//! # Environment Overrides
//!
//! - `PII_ANONYMIZER_LOG_LEVEL` replaces `logging.level`
//! - `PII_ANONYMIZER_LOG_JSON` replaces `logging.json`
//! - `PII_ANONYMIZER_LOG_FILE` enables file logging into the given directory

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_settings};
pub use schema::{LoggingConfig, Settings};
