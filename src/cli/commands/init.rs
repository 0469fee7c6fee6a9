//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "pii-anonymizer.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PII Anonymizer configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and bind a mechanism to each tag", self.output);
                println!("  2. Validate configuration: pii-anonymizer validate-config");
                println!(
                    "  3. Run: pii-anonymizer anonymize --input pii.jsonl --output anonymized.jsonl"
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Commented sample settings covering every mechanism
pub fn sample_config() -> &'static str {
    r#"# PII Anonymizer Configuration File
#
# Each PII carries a tag (e.g. PER, LOC, DATE). The mechanism bound to the tag
# anonymizes it; tags without a binding use default_mechanism, or pass through
# unchanged when no default is configured.
#
# Common options for every mechanism:
#   stateful = true          identical inputs always get identical outputs
#   encoder = "datetime"     anonymize dates and times as Unix timestamps
#   encoder = "delimitedNumber"  anonymize numbers like "12,18 €"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
level = "info"

# Console logs as JSON (logs go to stderr)
json = false

# JSON file logging with rotation (daily, hourly, never)
local_enabled = false
local_path = "./logs"
local_rotation = "daily"

# ============================================================================
# Fallback for tags without a dedicated mechanism
# ============================================================================
[anonymizer.default_mechanism]
mechanism = "suppression"
char = "X"

# ============================================================================
# Mechanisms by tag
# ============================================================================

# Replace every value with a constant
[anonymizer.mechanisms_by_tag.LOC]
mechanism = "generalization"
replacement = "<LOCATION>"

# Numbered pseudonyms; stateful keeps the same person on the same pseudonym
[anonymizer.mechanisms_by_tag.PER]
mechanism = "pseudonymization"
format = "Person {}"
counter_start = 1
stateful = true

# Fixed-length suppression
[anonymizer.mechanisms_by_tag.ID]
mechanism = "suppression"
char = "*"
length = 8

# Randomized response: report the truth with probability coin_p, otherwise a
# uniformly drawn value. Values outside the list map to default_value.
[anonymizer.mechanisms_by_tag.ANSWER]
mechanism = "randomizedResponse"
mode = "coin"
values = ["Yes", "No"]
coin_p = 0.5
default_value = "<UNKNOWN>"

# Differentially private randomized response
[anonymizer.mechanisms_by_tag.GENDER]
mechanism = "randomizedResponse"
mode = "dp"
values = ["female", "male", "diverse"]
epsilon = 1.0

# Laplace noise on dates, with a sensitivity of one day in seconds
[anonymizer.mechanisms_by_tag.DATE]
mechanism = "laplaceNoise"
epsilon = 0.0001
sensitivity = 86400
encoder = "datetime"

# Laplace noise on amounts such as "12,18 €"
[anonymizer.mechanisms_by_tag.AMOUNT]
mechanism = "laplaceNoise"
epsilon = 0.1
sensitivity = 10
encoder = "delimitedNumber"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::Anonymizer;
    use crate::config::parse_settings;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_is_valid() {
        let settings = parse_settings(sample_config(), false).unwrap();
        settings.validate().unwrap();
        let anonymizer = Anonymizer::new(&settings.anonymizer).unwrap();
        assert_eq!(
            anonymizer.tags(),
            ["AMOUNT", "ANSWER", "DATE", "GENDER", "ID", "LOC", "PER"]
        );
        assert!(anonymizer.has_default());
    }

    #[test]
    fn test_init_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("pii-anonymizer.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), sample_config());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("pii-anonymizer.toml");
        fs::write(&output, "# existing").unwrap();

        let mut args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");

        args.force = true;
        assert_eq!(args.execute().unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), sample_config());
    }
}
