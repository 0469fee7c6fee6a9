// PII Anonymizer - tag-routed anonymization of PII fragments
// Copyright (c) 2025 PII Anonymizer Contributors
// Licensed under the MIT License

use clap::Parser;
use pii_anonymizer::cli::{Cli, Commands};
use pii_anonymizer::config::{load_config, LoggingConfig};
use pii_anonymizer::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands report
    // load failures themselves
    let logging_config = match &cli.command {
        Commands::Init(_) => LoggingConfig::default(),
        _ => load_config(&cli.config)
            .map(|settings| settings.logging)
            .unwrap_or_default(),
    };
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| logging_config.level.clone());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "PII Anonymizer - tag-routed anonymization of PII fragments"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Anonymize(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
