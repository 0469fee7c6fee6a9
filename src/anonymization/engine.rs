//! Tag-routed anonymization
//!
//! The [`Anonymizer`] owns one mechanism instance per configured tag plus an
//! optional fallback, and routes every [`Pii`] to the mechanism for its tag.
//!
//! # Examples
//!
//! ```rust
//! use pii_anonymizer::anonymization::{Anonymizer, AnonymizerConfig};
//! use pii_anonymizer::domain::Pii;
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! let config: AnonymizerConfig = serde_json::from_str(
//!     r#"{"mechanisms_by_tag": {"PER": {"mechanism": "suppression"}}}"#,
//! )?;
//! let mut anonymizer = Anonymizer::new(&config)?;
//!
//! let result = anonymizer.anonymize_one(Pii::new("PER", "Jane"))?;
//! assert_eq!(result.text, "XXXX");
//! assert!(result.modified);
//!
//! let result = anonymizer.anonymize_one(Pii::new("LOC", "Berlin"))?;
//! assert_eq!(result.text, "Berlin");
//! assert!(!result.modified);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use super::config::{in_context, AnonymizerConfig};
use crate::domain::{AnonymizedPii, Pii, Result};
use crate::mechanisms::Mechanism;
use std::collections::HashMap;

/// Routes PII to the mechanism configured for its tag
///
/// Mechanisms may keep state (pseudonym counters, memoization caches), so
/// anonymizing takes `&mut self`. Share an `Anonymizer` across threads behind a
/// `Mutex`.
pub struct Anonymizer {
    default_mechanism: Option<Box<dyn Mechanism>>,
    mechanisms_by_tag: HashMap<String, Box<dyn Mechanism>>,
}

impl Anonymizer {
    /// Build fresh mechanism instances from a configuration
    ///
    /// Two anonymizers built from the same configuration share no state.
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`](crate::domain::AnonymizerError::InvalidConfig)
    /// naming the tag of the first invalid mechanism.
    pub fn new(config: &AnonymizerConfig) -> Result<Self> {
        let default_mechanism = config
            .default_mechanism
            .as_ref()
            .map(|mechanism| mechanism.build().map_err(|e| in_context("default", e)))
            .transpose()?;

        let mechanisms_by_tag = config
            .mechanisms_by_tag
            .iter()
            .map(|(tag, mechanism)| {
                mechanism
                    .build()
                    .map(|built| (tag.clone(), built))
                    .map_err(|e| in_context(&format!("tag '{tag}'"), e))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        tracing::info!(
            tags = mechanisms_by_tag.len(),
            has_default = default_mechanism.is_some(),
            "Anonymizer initialized"
        );

        Ok(Self {
            default_mechanism,
            mechanisms_by_tag,
        })
    }

    /// Anonymize a single PII
    ///
    /// Uses the mechanism bound to the tag, else the default mechanism. Without
    /// either, the PII is returned unchanged with `modified = false`.
    ///
    /// # Errors
    ///
    /// Propagates the mechanism's per-item error; the anonymizer stays usable.
    pub fn anonymize_one(&mut self, pii: Pii) -> Result<AnonymizedPii> {
        let mechanism = match self.mechanisms_by_tag.get_mut(&pii.tag) {
            Some(mechanism) => mechanism,
            None => match self.default_mechanism.as_mut() {
                Some(mechanism) => mechanism,
                None => {
                    tracing::trace!(tag = %pii.tag, id = ?pii.id, "No mechanism for tag");
                    return Ok(AnonymizedPii::from_pii(pii, None));
                }
            },
        };

        match mechanism.anonymize(&pii.text) {
            Ok(text) => {
                tracing::debug!(
                    tag = %pii.tag,
                    id = ?pii.id,
                    mechanism = mechanism.kind(),
                    "Anonymized PII"
                );
                Ok(AnonymizedPii::from_pii(pii, Some(text)))
            }
            Err(e) => {
                tracing::warn!(
                    tag = %pii.tag,
                    id = ?pii.id,
                    mechanism = mechanism.kind(),
                    error = %e,
                    "Failed to anonymize PII"
                );
                Err(e)
            }
        }
    }

    /// Lazily anonymize a sequence of PII in order
    ///
    /// Each item is processed when the iterator reaches it, and each item's error
    /// is yielded in its place. The iterator is single-pass: mechanisms advance
    /// their state as it is consumed.
    pub fn anonymize<'a, I>(
        &'a mut self,
        piis: I,
    ) -> impl Iterator<Item = Result<AnonymizedPii>> + 'a
    where
        I: IntoIterator<Item = Pii>,
        I::IntoIter: 'a,
    {
        piis.into_iter().map(move |pii| self.anonymize_one(pii))
    }

    /// Tags with a dedicated mechanism, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.mechanisms_by_tag.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Whether untagged PII falls back to a default mechanism
    pub fn has_default(&self) -> bool {
        self.default_mechanism.is_some()
    }

    /// Mechanism kind that would handle `tag`, if any
    pub fn mechanism_for(&self, tag: &str) -> Option<&'static str> {
        self.mechanisms_by_tag
            .get(tag)
            .or(self.default_mechanism.as_ref())
            .map(|mechanism| mechanism.kind())
    }
}

impl std::fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymizer")
            .field("tags", &self.tags())
            .field("has_default", &self.has_default())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnonymizerError;
    use crate::mechanisms::{
        MechanismConfig, PseudonymizationConfig, RandomizedResponseConfig, SuppressionConfig,
        SuppressionLength,
    };

    fn config(default: bool) -> AnonymizerConfig {
        let mut config = AnonymizerConfig::new()
            .with_tag(
                "foo",
                MechanismConfig::new(SuppressionConfig::new(
                    'Y',
                    Some(SuppressionLength::Fixed(3)),
                )),
            )
            .with_tag(
                "bar",
                MechanismConfig::new(PseudonymizationConfig::new("Bar {}")),
            );
        if default {
            config = config.with_default(MechanismConfig::new(SuppressionConfig::default()));
        }
        config
    }

    #[test]
    fn test_routes_by_tag_with_default() {
        let mut anonymizer = Anonymizer::new(&config(true)).unwrap();
        let piis = vec![
            Pii::new("test", "Alpha"),
            Pii::new("foo", "Beta"),
            Pii::new("bar", "Gamma"),
            Pii::new("bar", "Gamma"),
        ];

        let results: Vec<AnonymizedPii> = anonymizer
            .anonymize(piis)
            .collect::<Result<_>>()
            .unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["XXXXX", "YYY", "Bar 1", "Bar 2"]);
        assert!(results.iter().all(|r| r.modified));
    }

    #[test]
    fn test_unconfigured_tag_passes_through() {
        let mut anonymizer = Anonymizer::new(&config(false)).unwrap();
        let result = anonymizer
            .anonymize_one(Pii::new("test", "Alpha").with_id(4))
            .unwrap();
        assert_eq!(result.text, "Alpha");
        assert_eq!(result.id, Some(4));
        assert!(!result.modified);
    }

    #[test]
    fn test_errors_surface_per_item() {
        let config = AnonymizerConfig::new().with_tag(
            "answer",
            MechanismConfig::new(RandomizedResponseConfig::coin(
                vec!["Yes".to_string(), "No".to_string()],
                1.0,
            )),
        );
        let mut anonymizer = Anonymizer::new(&config).unwrap();

        let results: Vec<Result<AnonymizedPii>> = anonymizer
            .anonymize(vec![
                Pii::new("answer", "Yes"),
                Pii::new("answer", "Maybe"),
                Pii::new("answer", "No"),
            ])
            .collect();

        assert_eq!(results[0].as_ref().unwrap().text, "Yes");
        assert!(matches!(
            results[1],
            Err(AnonymizerError::CategoryNotFound(_))
        ));
        assert_eq!(results[2].as_ref().unwrap().text, "No");
    }

    #[test]
    fn test_iteration_is_lazy() {
        let mut anonymizer = Anonymizer::new(&config(false)).unwrap();
        {
            let mut results = anonymizer.anonymize(vec![Pii::new("bar", "a"), Pii::new("bar", "b")]);
            assert_eq!(results.next().unwrap().unwrap().text, "Bar 1");
        }
        // Only one item was consumed, so the counter advanced once
        let next = anonymizer.anonymize_one(Pii::new("bar", "c")).unwrap();
        assert_eq!(next.text, "Bar 2");
    }

    #[test]
    fn test_invalid_config_names_tag() {
        let config = AnonymizerConfig::new().with_tag(
            "bad",
            MechanismConfig::new(PseudonymizationConfig::new("no slot")),
        );
        let err = Anonymizer::new(&config).unwrap_err();
        assert!(err.to_string().contains("tag 'bad'"), "{err}");
    }

    #[test]
    fn test_introspection() {
        let anonymizer = Anonymizer::new(&config(true)).unwrap();
        assert_eq!(anonymizer.tags(), ["bar", "foo"]);
        assert!(anonymizer.has_default());
        assert_eq!(anonymizer.mechanism_for("bar"), Some("pseudonymization"));
        assert_eq!(anonymizer.mechanism_for("other"), Some("suppression"));
    }
}
