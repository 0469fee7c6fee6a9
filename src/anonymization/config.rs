//! Anonymizer configuration

use crate::domain::{AnonymizerError, Result};
use crate::mechanisms::MechanismConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which mechanism anonymizes which tag
///
/// Tags without an entry fall back to `default_mechanism`. Without a default, PII
/// with an unconfigured tag passes through unmodified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Mechanism for tags without a dedicated entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mechanism: Option<MechanismConfig>,

    /// Dedicated mechanism per tag
    #[serde(default)]
    pub mechanisms_by_tag: BTreeMap<String, MechanismConfig>,
}

impl AnonymizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback mechanism
    pub fn with_default(mut self, mechanism: impl Into<MechanismConfig>) -> Self {
        self.default_mechanism = Some(mechanism.into());
        self
    }

    /// Bind a mechanism to a tag, replacing any previous binding
    pub fn with_tag(mut self, tag: impl Into<String>, mechanism: impl Into<MechanismConfig>) -> Self {
        self.mechanisms_by_tag.insert(tag.into(), mechanism.into());
        self
    }

    /// Validate every mechanism
    ///
    /// # Errors
    ///
    /// Returns the first invalid mechanism's error, prefixed with its tag (or
    /// `default` for the fallback mechanism).
    pub fn validate(&self) -> Result<()> {
        if let Some(mechanism) = &self.default_mechanism {
            mechanism.validate().map_err(|e| in_context("default", e))?;
        }
        for (tag, mechanism) in &self.mechanisms_by_tag {
            mechanism
                .validate()
                .map_err(|e| in_context(&format!("tag '{tag}'"), e))?;
        }
        Ok(())
    }

    /// Whether nothing would be anonymized
    pub fn is_empty(&self) -> bool {
        self.default_mechanism.is_none() && self.mechanisms_by_tag.is_empty()
    }
}

/// Prefix a configuration error with the mechanism it belongs to
pub(crate) fn in_context(owner: &str, error: AnonymizerError) -> AnonymizerError {
    match error {
        AnonymizerError::InvalidConfig(msg) => {
            AnonymizerError::InvalidConfig(format!("Mechanism for {owner}: {msg}"))
        }
        other => other,
    }
}
