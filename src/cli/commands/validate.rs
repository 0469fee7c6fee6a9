//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the settings
//! file and builds every configured mechanism without anonymizing anything.

use crate::anonymization::Anonymizer;
use crate::config::{load_config, Settings};
use crate::mechanisms::MechanismConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let settings = match load_config(config_path) {
            Ok(settings) => {
                println!("✅ Configuration file loaded successfully");
                settings
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match Anonymizer::new(&settings.anonymizer) {
            Ok(_) => {
                println!("✅ All mechanisms built successfully");
                println!();
                for line in summary(&settings) {
                    println!("{line}");
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

/// Human-readable summary of the loaded settings
fn summary(settings: &Settings) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", settings.logging.level),
        format!(
            "  File Logging: {}",
            if settings.logging.local_enabled {
                settings.logging.local_path.as_str()
            } else {
                "disabled"
            }
        ),
    ];

    let anonymizer = &settings.anonymizer;
    lines.push(match &anonymizer.default_mechanism {
        Some(mechanism) => format!("  Default Mechanism: {}", describe(mechanism)),
        None => "  Default Mechanism: none (unconfigured tags pass through)".to_string(),
    });

    if anonymizer.mechanisms_by_tag.is_empty() {
        lines.push("  Tags: none".to_string());
    } else {
        lines.push(format!("  Tags ({}):", anonymizer.mechanisms_by_tag.len()));
        for (tag, mechanism) in &anonymizer.mechanisms_by_tag {
            lines.push(format!("    {tag}: {}", describe(mechanism)));
        }
    }

    lines
}

fn describe(mechanism: &MechanismConfig) -> String {
    let mut description = mechanism.name().to_string();
    if mechanism.stateful {
        description.push_str(", stateful");
    }
    if let Some(encoder) = mechanism.encoder {
        description.push_str(", encoder: ");
        description.push_str(encoder.name());
    }
    description
}
