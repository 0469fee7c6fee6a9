//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the anonymizer using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PII Anonymizer - tag-routed anonymization of PII fragments
#[derive(Parser, Debug)]
#[command(name = "pii-anonymizer")]
#[command(version, about, long_about = None)]
#[command(author = "PII Anonymizer Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "pii-anonymizer.toml",
        env = "PII_ANONYMIZER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_ANONYMIZER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize PII read as JSON Lines
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymize() {
        let cli = Cli::parse_from(["pii-anonymizer", "anonymize"]);
        assert_eq!(cli.config, "pii-anonymizer.toml");
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, "-");
                assert_eq!(args.output, "-");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_anonymize_files() {
        let cli = Cli::parse_from([
            "pii-anonymizer",
            "anonymize",
            "--input",
            "in.jsonl",
            "-o",
            "out.jsonl",
        ]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.input, "in.jsonl");
                assert_eq!(args.output, "out.jsonl");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["pii-anonymizer", "--config", "custom.toml", "anonymize"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["pii-anonymizer", "--log-level", "debug", "anonymize"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["pii-anonymizer", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["pii-anonymizer", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => assert!(args.force),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
