//! Encoder for numbers embedded in text
//!
//! Handles values like `12,18 €`, `EURO -12,14` or `+49 123 456-789`: a non-digit
//! prefix, a run of digits separated by arbitrary non-word delimiters, and a non-digit
//! suffix. A single `.` (or, failing that, a single `,`) in the number is taken as
//! the decimal separator, every other delimiter is dropped.
//!
//! Grouping separators are not restored on decode, so `+49 123 456-789` comes back
//! as `+49123456789`. Only ASCII digits form the number.

use super::{ContextValue, Encoder, EncoderContext};
use crate::domain::{AnonymizerError, Result};
use regex::Regex;
use std::sync::LazyLock;

const PREFIX_KEY: &str = "prefix";
const SUFFIX_KEY: &str = "suffix";
const FLOAT_DELIMITER_KEY: &str = "float_delimiter";
const PRECISION_KEY: &str = "precision";

static DELIMITED_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9]*?)(-?(([0-9]+)(\W*?))+)([^0-9]*)$")
        .expect("delimited number pattern is valid")
});

/// Encoder for delimited numbers with prefix and suffix
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedNumberEncoder;

impl DelimitedNumberEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for DelimitedNumberEncoder {
    fn encode(&self, value: &str) -> Result<(f64, EncoderContext)> {
        let captures = DELIMITED_NUMBER.captures(value).ok_or_else(|| {
            AnonymizerError::InvalidInput("Value does not look like a delimited number".to_string())
        })?;
        let prefix = captures.get(1).map_or("", |m| m.as_str());
        let number = captures.get(2).map_or("", |m| m.as_str());
        let suffix = captures.get(6).map_or("", |m| m.as_str());

        let float_delimiter = if number.matches('.').count() == 1 {
            Some('.')
        } else if number.matches(',').count() == 1 {
            Some(',')
        } else {
            None
        };

        let mut canonical = String::with_capacity(number.len());
        if number.starts_with('-') {
            canonical.push('-');
        }
        let mut precision: i64 = 0;
        let mut in_fraction = false;
        for c in number.chars() {
            if c.is_ascii_digit() {
                canonical.push(c);
                if in_fraction {
                    precision += 1;
                }
            } else if Some(c) == float_delimiter {
                canonical.push('.');
                in_fraction = true;
            }
        }

        let parsed: f64 = canonical.parse().map_err(|_| {
            AnonymizerError::InvalidInput("Delimited number is not a valid number".to_string())
        })?;

        let ctx = EncoderContext::new()
            .with(PREFIX_KEY, ContextValue::Text(prefix.to_string()))
            .with(SUFFIX_KEY, ContextValue::Text(suffix.to_string()))
            .with(
                FLOAT_DELIMITER_KEY,
                float_delimiter.map_or(ContextValue::Null, |d| ContextValue::Text(d.to_string())),
            )
            .with(PRECISION_KEY, ContextValue::Integer(precision));
        Ok((parsed, ctx))
    }

    fn decode(&self, value: f64, ctx: &EncoderContext) -> Result<String> {
        let prefix = ctx.text(PREFIX_KEY)?;
        let suffix = ctx.text(SUFFIX_KEY)?;
        let float_delimiter = ctx.optional_text(FLOAT_DELIMITER_KEY)?;
        let precision = ctx.integer(PRECISION_KEY)?;
        let precision = usize::try_from(precision).map_err(|_| {
            AnonymizerError::InvalidContext(format!("negative precision {precision}"))
        })?;

        if !value.is_finite() {
            return Err(AnonymizerError::InvalidInput(
                "Cannot decode a non-finite number".to_string(),
            ));
        }

        let mut number = format!("{value:.precision$}");
        if float_delimiter == Some(",") {
            number = number.replace('.', ",");
        }
        Ok(format!("{prefix}{number}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(input: &str, delta: f64) -> Result<String> {
        let encoder = DelimitedNumberEncoder::new();
        let (value, ctx) = encoder.encode(input)?;
        encoder.decode(value + delta, &ctx)
    }

    #[test]
    fn test_encode_context() {
        let (value, ctx) = DelimitedNumberEncoder::new().encode("12,18 €").unwrap();
        assert_eq!(value, 12.18);
        assert_eq!(ctx.text(PREFIX_KEY).unwrap(), "");
        assert_eq!(ctx.text(SUFFIX_KEY).unwrap(), " €");
        assert_eq!(ctx.optional_text(FLOAT_DELIMITER_KEY).unwrap(), Some(","));
        assert_eq!(ctx.integer(PRECISION_KEY).unwrap(), 2);
    }

    #[test]
    fn test_shift_keeps_shape() {
        assert_eq!(shift("12.14$", 2.1).unwrap(), "14.24$");
        assert_eq!(shift("12.14$", 2.159).unwrap(), "14.30$");
        assert_eq!(shift("EURO -12,14", 24.0).unwrap(), "EURO 11,86");
        assert_eq!(shift("Age: 42 years", 1.0).unwrap(), "Age: 43 years");
    }

    #[test]
    fn test_grouping_separators_are_dropped() {
        assert_eq!(shift("+49 123 456-789", 0.0).unwrap(), "+49123456789");
        assert_eq!(shift("+49 123 456-789", 1.0).unwrap(), "+49123456790");
        assert_eq!(
            shift("+1 (203) 11-111 CALL ME", 0.0).unwrap(),
            "+120311111 CALL ME"
        );
        assert_eq!(shift("100.000.000,12€", 0.0).unwrap(), "100000000,12€");
    }

    #[test]
    fn test_trailing_delimiter_goes_to_suffix() {
        let (value, ctx) = DelimitedNumberEncoder::new().encode("12.").unwrap();
        assert_eq!(value, 12.0);
        assert_eq!(ctx.text(SUFFIX_KEY).unwrap(), ".");
        assert_eq!(shift("12.", 0.0).unwrap(), "12.");
    }

    #[test]
    fn test_canonical_round_trip() {
        for input in ["12,18 €", "EURO -12,14", "$ 1000", "-0.5", "7"] {
            assert_eq!(shift(input, 0.0).unwrap(), input);
        }
    }

    #[test]
    fn test_encode_rejects_non_numbers() {
        let encoder = DelimitedNumberEncoder::new();
        assert!(matches!(
            encoder.encode("+1 (203) CALL ME 521"),
            Err(AnonymizerError::InvalidInput(_))
        ));
        assert!(matches!(
            encoder.encode("no digits"),
            Err(AnonymizerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_bad_context() {
        let encoder = DelimitedNumberEncoder::new();
        assert!(matches!(
            encoder.decode(1.0, &EncoderContext::new()),
            Err(AnonymizerError::InvalidContext(_))
        ));

        let ctx = EncoderContext::new()
            .with(PREFIX_KEY, ContextValue::Text(String::new()))
            .with(SUFFIX_KEY, ContextValue::Text(String::new()))
            .with(FLOAT_DELIMITER_KEY, ContextValue::Null)
            .with(PRECISION_KEY, ContextValue::Integer(-1));
        assert!(matches!(
            encoder.decode(1.0, &ctx),
            Err(AnonymizerError::InvalidContext(_))
        ));
    }

    #[test]
    fn test_decode_missing_precision() {
        let encoder = DelimitedNumberEncoder::new();
        let (value, mut ctx) = encoder.encode("12,18 €").unwrap();
        assert_eq!(ctx.remove(PRECISION_KEY), Some(ContextValue::Integer(2)));
        assert!(matches!(
            encoder.decode(value, &ctx),
            Err(AnonymizerError::InvalidContext(_))
        ));
    }

    #[test]
    fn test_only_ascii_digits_form_the_number() {
        assert!(matches!(
            DelimitedNumberEncoder::new().encode("\u{663}"),
            Err(AnonymizerError::InvalidInput(_))
        ));

        let (value, ctx) = DelimitedNumberEncoder::new().encode("\u{663} 12").unwrap();
        assert_eq!(value, 12.0);
        assert_eq!(ctx.text(PREFIX_KEY).unwrap(), "\u{663} ");
        assert_eq!(shift("\u{663} 12", 1.0).unwrap(), "\u{663} 13");
    }

    #[test]
    fn test_decode_non_finite() {
        let (_, ctx) = DelimitedNumberEncoder::new().encode("1").unwrap();
        assert!(matches!(
            DelimitedNumberEncoder::new().decode(f64::INFINITY, &ctx),
            Err(AnonymizerError::InvalidInput(_))
        ));
    }
}
