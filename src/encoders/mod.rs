//! Encoders bridging structured text and numeric mechanisms
//!
//! An encoder transforms a value before it is passed to an anonymization mechanism
//! and transforms the result back afterwards. Some mechanisms (e.g. Laplace noise)
//! only make sense on numbers, while PII in text often looks like `2020-01-02` or
//! `12,18 €`.
//!
//! `decode` never sees the original value. Everything it needs is carried in the
//! [`EncoderContext`] returned by `encode`, and that context holds purely structural
//! information such as a date format or a numeric precision.
//!
//! ```rust
//! use pii_anonymizer::encoders::{DelimitedNumberEncoder, Encoder};
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! let encoder = DelimitedNumberEncoder::new();
//! let (value, ctx) = encoder.encode("12,18 €")?;
//! assert_eq!(encoder.decode(value + 2.1, &ctx)?, "14,28 €");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod dateparse;
pub mod datetime;
pub mod delimited_number;

pub use datetime::DateTimeEncoder;
pub use delimited_number::DelimitedNumberEncoder;

use crate::domain::{AnonymizerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Bidirectional transform between text and a number
pub trait Encoder: Debug + Send + Sync {
    /// Encode a value and return the structural context needed to decode it
    fn encode(&self, value: &str) -> Result<(f64, EncoderContext)>;

    /// Decode a (possibly anonymized) number using the context from `encode`
    fn decode(&self, value: f64, ctx: &EncoderContext) -> Result<String>;
}

/// Encoders selectable by name in a mechanism configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EncoderKind {
    /// Dates and times, encoded as Unix timestamps
    Datetime,
    /// Numbers with prefix, suffix and delimiters
    DelimitedNumber,
}

impl EncoderKind {
    /// Instantiate the encoder
    pub fn to_encoder(self) -> Box<dyn Encoder> {
        match self {
            Self::Datetime => Box::new(DateTimeEncoder::new()),
            Self::DelimitedNumber => Box::new(DelimitedNumberEncoder::new()),
        }
    }

    /// Configuration name of the encoder
    pub fn name(&self) -> &'static str {
        match self {
            Self::Datetime => "datetime",
            Self::DelimitedNumber => "delimitedNumber",
        }
    }
}

/// A single structural value carried from `encode` to `decode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    /// Text such as a format string or a suffix
    Text(String),
    /// Whole numbers such as a precision or an offset in seconds
    Integer(i64),
    /// Explicitly absent value
    Null,
}

/// Structural metadata produced by [`Encoder::encode`] and required by [`Encoder::decode`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderContext {
    entries: BTreeMap<String, ContextValue>,
}

impl EncoderContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, builder style
    pub fn with(mut self, key: impl Into<String>, value: ContextValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue) {
        self.entries.insert(key.into(), value);
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.entries.remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Required text entry
    pub fn text(&self, key: &str) -> Result<&str> {
        match self.required(key)? {
            ContextValue::Text(text) => Ok(text),
            other => Err(mistyped(key, "text", other)),
        }
    }

    /// Required entry that is either text or null
    pub fn optional_text(&self, key: &str) -> Result<Option<&str>> {
        match self.required(key)? {
            ContextValue::Text(text) => Ok(Some(text)),
            ContextValue::Null => Ok(None),
            other => Err(mistyped(key, "text or null", other)),
        }
    }

    /// Required integer entry
    pub fn integer(&self, key: &str) -> Result<i64> {
        match self.required(key)? {
            ContextValue::Integer(value) => Ok(*value),
            other => Err(mistyped(key, "integer", other)),
        }
    }

    /// Required entry that is either an integer or null
    pub fn optional_integer(&self, key: &str) -> Result<Option<i64>> {
        match self.required(key)? {
            ContextValue::Integer(value) => Ok(Some(*value)),
            ContextValue::Null => Ok(None),
            other => Err(mistyped(key, "integer or null", other)),
        }
    }

    fn required(&self, key: &str) -> Result<&ContextValue> {
        self.entries
            .get(key)
            .ok_or_else(|| AnonymizerError::InvalidContext(format!("missing key '{key}'")))
    }
}

fn mistyped(key: &str, expected: &str, found: &ContextValue) -> AnonymizerError {
    AnonymizerError::InvalidContext(format!(
        "key '{key}' must be {expected}, found {found:?}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_accessors() {
        let ctx = EncoderContext::new()
            .with("format", ContextValue::Text("%Y".to_string()))
            .with("precision", ContextValue::Integer(2))
            .with("timezone", ContextValue::Null);

        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.text("format").unwrap(), "%Y");
        assert_eq!(ctx.integer("precision").unwrap(), 2);
        assert_eq!(ctx.optional_integer("timezone").unwrap(), None);
        assert_eq!(ctx.optional_text("format").unwrap(), Some("%Y"));
    }

    #[test]
    fn test_context_missing_key() {
        let ctx = EncoderContext::new();
        assert!(ctx.is_empty());
        assert!(matches!(
            ctx.text("format"),
            Err(AnonymizerError::InvalidContext(_))
        ));
    }

    #[test]
    fn test_context_mistyped_key() {
        let ctx = EncoderContext::new().with("precision", ContextValue::Text("2".to_string()));
        assert!(matches!(
            ctx.integer("precision"),
            Err(AnonymizerError::InvalidContext(_))
        ));
        assert!(ctx.optional_text("precision").is_ok());
    }

    #[test]
    fn test_encoder_kind_names() {
        let kind: EncoderKind = serde_json::from_str(r#""delimitedNumber""#).unwrap();
        assert_eq!(kind, EncoderKind::DelimitedNumber);
        assert_eq!(kind.name(), "delimitedNumber");

        let kind: EncoderKind = serde_json::from_str(r#""datetime""#).unwrap();
        assert_eq!(kind, EncoderKind::Datetime);
        assert!(serde_json::from_str::<EncoderKind>(r#""base64""#).is_err());
    }
}
