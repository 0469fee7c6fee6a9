//! Pseudonymization: numbered pseudonyms from a format string

use super::Mechanism;
use crate::domain::{AnonymizerError, Result};
use serde::{Deserialize, Serialize};

pub(crate) const KIND: &str = "pseudonymization";

const SLOT: &str = "{}";

fn default_counter_start() -> i64 {
    1
}

/// Parameters of [`Pseudonymization`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PseudonymizationConfig {
    /// Format with exactly one `{}` slot, e.g. `"Person {}"`
    pub format: String,

    /// First counter value
    #[serde(default = "default_counter_start")]
    pub counter_start: i64,
}

impl PseudonymizationConfig {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            counter_start: default_counter_start(),
        }
    }

    pub fn with_counter_start(mut self, counter_start: i64) -> Self {
        self.counter_start = counter_start;
        self
    }

    pub fn validate(&self) -> Result<()> {
        split_format(&self.format).map(|_| ())
    }

    pub fn build(&self) -> Result<Pseudonymization> {
        Pseudonymization::new(&self.format, self.counter_start)
    }
}

/// Split a format around its single `{}` slot
fn split_format(format: &str) -> Result<(&str, &str)> {
    let invalid = || {
        AnonymizerError::InvalidConfig(format!(
            "Pseudonym format must contain exactly one '{SLOT}' and no other braces: '{format}'"
        ))
    };

    let (prefix, suffix) = format.split_once(SLOT).ok_or_else(invalid)?;
    let has_brace = |s: &str| s.contains(['{', '}']);
    if has_brace(prefix) || has_brace(suffix) {
        return Err(invalid());
    }
    Ok((prefix, suffix))
}

/// Replaces each value with the next numbered pseudonym
///
/// Every call advances the counter, so the same input gets a new pseudonym each
/// time unless the mechanism is wrapped in [`Stateful`](super::Stateful).
#[derive(Debug, Clone)]
pub struct Pseudonymization {
    prefix: String,
    suffix: String,
    counter: i64,
}

impl Pseudonymization {
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`] unless `format` has exactly one `{}`.
    pub fn new(format: &str, counter_start: i64) -> Result<Self> {
        let (prefix, suffix) = split_format(format)?;
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            counter: counter_start,
        })
    }

    /// Counter value used by the next call
    pub fn counter(&self) -> i64 {
        self.counter
    }
}

impl Mechanism for Pseudonymization {
    fn anonymize(&mut self, _input: &str) -> Result<String> {
        let current = self.counter;
        self.counter = current.checked_add(1).ok_or_else(|| {
            AnonymizerError::InvalidInput("Pseudonym counter exhausted".to_string())
        })?;
        Ok(format!("{}{}{}", self.prefix, current, self.suffix))
    }

    fn kind(&self) -> &'static str {
        KIND
    }
}
