//! Suppression: mask the value with a repeated character

use super::Mechanism;
use crate::domain::{AnonymizerError, Result};
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub(crate) const KIND: &str = "suppression";

const DEFAULT_CHAR: char = 'X';

type LengthFn = dyn Fn(usize) -> i64 + Send + Sync;

/// Length of the mask
#[derive(Clone)]
pub enum SuppressionLength {
    /// Same length for every input
    Fixed(i64),
    /// Length computed from the input length in characters
    Computed(Arc<LengthFn>),
}

impl SuppressionLength {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(usize) -> i64 + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }
}

impl fmt::Debug for SuppressionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl Serialize for SuppressionLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(n) => serializer.serialize_i64(*n),
            Self::Computed(_) => Err(S::Error::custom(
                "a computed suppression length cannot be serialized",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for SuppressionLength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::Fixed)
    }
}

fn default_char() -> char {
    DEFAULT_CHAR
}

/// Parameters of [`Suppression`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuppressionConfig {
    /// Masking character
    #[serde(rename = "char", default = "default_char")]
    pub suppression_char: char,

    /// Mask length, the input length when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<SuppressionLength>,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            suppression_char: DEFAULT_CHAR,
            length: None,
        }
    }
}

impl SuppressionConfig {
    pub fn new(suppression_char: char, length: Option<SuppressionLength>) -> Self {
        Self {
            suppression_char,
            length,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(SuppressionLength::Fixed(n)) = self.length {
            if n < 0 {
                return Err(AnonymizerError::InvalidConfig(format!(
                    "Suppression length must not be negative, got {n}"
                )));
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Suppression> {
        Suppression::new(self.suppression_char, self.length.clone())
    }
}

/// Replaces every character with a masking character
#[derive(Debug, Clone)]
pub struct Suppression {
    suppression_char: char,
    length: Option<SuppressionLength>,
}

impl Suppression {
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`] for a negative fixed length.
    pub fn new(suppression_char: char, length: Option<SuppressionLength>) -> Result<Self> {
        SuppressionConfig::new(suppression_char, length.clone()).validate()?;
        Ok(Self {
            suppression_char,
            length,
        })
    }

    fn mask_length(&self, input: &str) -> Result<usize> {
        let input_length = input.chars().count();
        let length = match &self.length {
            None => return Ok(input_length),
            Some(SuppressionLength::Fixed(n)) => *n,
            Some(SuppressionLength::Computed(f)) => f(input_length),
        };
        usize::try_from(length).map_err(|_| {
            AnonymizerError::InvalidConfig(format!(
                "Suppression length must not be negative, got {length}"
            ))
        })
    }
}

impl Mechanism for Suppression {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        let length = self.mask_length(input)?;
        Ok(std::iter::repeat(self.suppression_char).take(length).collect())
    }

    fn kind(&self) -> &'static str {
        KIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_masks_each_char() {
        let mut mechanism = SuppressionConfig::default().build().unwrap();
        assert_eq!(mechanism.anonymize("Alice").unwrap(), "XXXXX");
        assert_eq!(mechanism.anonymize("").unwrap(), "");
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let mut mechanism = Suppression::new('*', None).unwrap();
        assert_eq!(mechanism.anonymize("Jörg").unwrap(), "****");
    }

    #[test]
    fn test_fixed_length() {
        let mut mechanism = Suppression::new('Y', Some(SuppressionLength::Fixed(3))).unwrap();
        assert_eq!(mechanism.anonymize("Beta").unwrap(), "YYY");
        assert_eq!(mechanism.anonymize("A").unwrap(), "YYY");
    }

    #[test]
    fn test_computed_length() {
        let mut mechanism = Suppression::new(
            'X',
            Some(SuppressionLength::computed(|n| n as i64 * 2)),
        )
        .unwrap();
        assert_eq!(mechanism.anonymize("abc").unwrap(), "XXXXXX");
    }

    #[test]
    fn test_negative_fixed_length_rejected_at_build() {
        assert!(matches!(
            Suppression::new('X', Some(SuppressionLength::Fixed(-1))),
            Err(AnonymizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_computed_length_fails_per_call() {
        let mut mechanism = Suppression::new(
            'X',
            Some(SuppressionLength::computed(|n| n as i64 - 3)),
        )
        .unwrap();
        assert_eq!(mechanism.anonymize("abcd").unwrap(), "X");
        assert!(matches!(
            mechanism.anonymize("ab"),
            Err(AnonymizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_fields() {
        let config: SuppressionConfig =
            serde_json::from_str(r##"{"char": "#", "length": 2}"##).unwrap();
        assert_eq!(config.suppression_char, '#');
        assert_eq!(config.build().unwrap().anonymize("long").unwrap(), "##");

        assert!(serde_json::from_str::<SuppressionConfig>(r#"{"char": "ab"}"#).is_err());
    }
}
