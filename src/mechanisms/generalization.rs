//! Generalization: replace the value with something less specific

use super::Mechanism;
use crate::domain::Result;
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub(crate) const KIND: &str = "generalization";

type ReplacementFn = dyn Fn(&str) -> String + Send + Sync;

/// What a generalized value is replaced with
#[derive(Clone)]
pub enum Replacement {
    /// The same text for every input
    Constant(String),
    /// Text computed from the input, e.g. `Berlin` to `B*****`
    Computed(Arc<ReplacementFn>),
}

impl Replacement {
    /// Replacement computed from the input
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    fn apply(&self, input: &str) -> String {
        match self {
            Self::Constant(text) => text.clone(),
            Self::Computed(f) => f(input),
        }
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(text) => f.debug_tuple("Constant").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Self::Constant(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Self::Constant(text)
    }
}

impl Serialize for Replacement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Constant(text) => serializer.serialize_str(text),
            Self::Computed(_) => Err(S::Error::custom(
                "a computed replacement cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Replacement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Constant)
    }
}

/// Parameters of [`Generalization`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralizationConfig {
    pub replacement: Replacement,
}

impl GeneralizationConfig {
    pub fn new(replacement: impl Into<Replacement>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }

    /// Build the mechanism; generalization has no invalid parameters
    pub fn build(&self) -> Generalization {
        Generalization::new(self.replacement.clone())
    }
}

/// Replaces every value with a constant or a value computed from the input
#[derive(Debug, Clone)]
pub struct Generalization {
    replacement: Replacement,
}

impl Generalization {
    pub fn new(replacement: impl Into<Replacement>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }
}

impl Mechanism for Generalization {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        Ok(self.replacement.apply(input))
    }

    fn kind(&self) -> &'static str {
        KIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_replacement() {
        let mut mechanism = Generalization::new("<CITY>");
        assert_eq!(mechanism.anonymize("Berlin").unwrap(), "<CITY>");
        assert_eq!(mechanism.anonymize("").unwrap(), "<CITY>");
    }

    #[test]
    fn test_computed_replacement_sees_input() {
        let mut mechanism = Generalization::new(Replacement::computed(|input| {
            input.chars().take(1).collect::<String>() + "."
        }));
        assert_eq!(mechanism.anonymize("Berlin").unwrap(), "B.");
        assert_eq!(mechanism.anonymize("Hamburg").unwrap(), "H.");
    }

    #[test]
    fn test_config_round_trip() {
        let config: GeneralizationConfig =
            serde_json::from_str(r#"{"replacement": "<NAME>"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"replacement":"<NAME>"}"#
        );
        assert_eq!(config.build().anonymize("Jane").unwrap(), "<NAME>");
    }

    #[test]
    fn test_computed_replacement_not_serializable() {
        let config = GeneralizationConfig::new(Replacement::computed(|s| s.to_uppercase()));
        assert!(serde_json::to_string(&config).is_err());
        assert_eq!(format!("{:?}", config.replacement), "Computed(..)");
    }
}
