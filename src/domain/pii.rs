//! PII data models

use serde::{Deserialize, Serialize};

/// A tagged text fragment that requires anonymization
///
/// Created by the caller and never mutated by the anonymizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pii {
    /// Tag used to select the anonymization mechanism (e.g. "PER", "LOC")
    pub tag: String,
    /// Cleartext value
    pub text: String,
    /// Optional identifier for the entity to be anonymized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Pii {
    /// Create a new PII without an identifier
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            id: None,
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Result of anonymizing a single [`Pii`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedPii {
    /// Tag of the source PII
    pub tag: String,
    /// Replacement text, or the original text if nothing applied
    pub text: String,
    /// Identifier of the source PII
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Whether a mechanism replaced the text
    pub modified: bool,
}

impl AnonymizedPii {
    /// Create the anonymized counterpart of a PII
    ///
    /// `modified` is set iff a replacement is given.
    pub fn from_pii(pii: Pii, replacement: Option<String>) -> Self {
        let modified = replacement.is_some();
        Self {
            tag: pii.tag,
            text: replacement.unwrap_or(pii.text),
            id: pii.id,
            modified,
        }
    }
}
