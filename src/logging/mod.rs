//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON console logs on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! Log events carry tags, ids and mechanism kinds. PII text never appears in them.
//!
//! # Example
//!
//! ```no_run
//! use pii_anonymizer::logging::init_logging;
//! use pii_anonymizer::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of an anonymization run
///
/// # Example
///
/// ```no_run
/// use pii_anonymizer::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(42, 40, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($total:expr, $modified:expr, $duration:expr) => {
        tracing::info!(
            total = $total,
            modified = $modified,
            duration_ms = $duration.as_millis() as u64,
            "Anonymization completed"
        );
    };
}
