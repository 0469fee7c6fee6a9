//! Configuration loader with TOML/JSON parsing and environment variable overrides

use super::schema::Settings;
use crate::domain::errors::AnonymizerError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Loads settings from a TOML (or `.json`) file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses TOML, or JSON when the extension is `.json`
/// 4. Applies environment variable overrides (PII_ANONYMIZER_* prefix)
/// 5. Validates the settings
///
/// # Errors
///
/// Returns [`AnonymizerError::Configuration`] if the file cannot be read or parsed,
/// or a referenced environment variable is missing, and
/// [`AnonymizerError::InvalidConfig`] if a mechanism is invalid.
///
/// # Examples
///
/// ```no_run
/// use pii_anonymizer::config::loader::load_config;
///
/// let settings = load_config("pii-anonymizer.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonymizerError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonymizerError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut settings = parse_settings(&contents, is_json)?;

    apply_env_overrides(&mut settings)?;

    settings.validate()?;

    tracing::debug!(
        path = %path.display(),
        tags = settings.anonymizer.mechanisms_by_tag.len(),
        has_default = settings.anonymizer.default_mechanism.is_some(),
        "Configuration loaded"
    );

    Ok(settings)
}

/// Parses settings from a string without touching the environment
pub fn parse_settings(contents: &str, is_json: bool) -> Result<Settings> {
    if is_json {
        serde_json::from_str(contents)
            .map_err(|e| AnonymizerError::Configuration(format!("Failed to parse JSON: {e}")))
    } else {
        toml::from_str(contents)
            .map_err(|e| AnonymizerError::Configuration(format!("Failed to parse TOML: {e}")))
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines (starting with `#`) are left untouched. All missing variables are
/// reported together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = ENV_PLACEHOLDER.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AnonymizerError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PII_ANONYMIZER_* prefix
fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    if let Ok(val) = std::env::var("PII_ANONYMIZER_LOG_LEVEL") {
        settings.logging.level = val;
    }
    if let Ok(val) = std::env::var("PII_ANONYMIZER_LOG_JSON") {
        settings.logging.json = val.parse().map_err(|_| {
            AnonymizerError::Configuration(format!(
                "Invalid PII_ANONYMIZER_LOG_JSON value '{val}', expected true or false"
            ))
        })?;
    }
    if let Ok(val) = std::env::var("PII_ANONYMIZER_LOG_FILE") {
        settings.logging.local_enabled = true;
        settings.logging.local_path = val;
    }

    Ok(())
}
