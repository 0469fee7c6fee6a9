//! Encoding wrapper: run a mechanism on the encoded form of a value

use super::Mechanism;
use crate::domain::{AnonymizerError, Result};
use crate::encoders::Encoder;

/// Encodes the input, anonymizes the encoded number and decodes the result
///
/// The encoded number is handed to the wrapped mechanism as its shortest
/// round-trip decimal string. Only the encoder context, never the original input,
/// is used to decode. Without an encoder the wrapper is transparent.
#[derive(Debug)]
pub struct Encoding<M> {
    inner: M,
    encoder: Option<Box<dyn Encoder>>,
}

impl<M: Mechanism> Encoding<M> {
    pub fn new(inner: M, encoder: Option<Box<dyn Encoder>>) -> Self {
        Self { inner, encoder }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Mechanism> Mechanism for Encoding<M> {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        let Some(encoder) = &self.encoder else {
            return self.inner.anonymize(input);
        };

        let (value, ctx) = encoder.encode(input)?;
        let output = self.inner.anonymize(&value.to_string())?;
        let output: f64 = output.trim().parse().map_err(|_| {
            AnonymizerError::InvalidInput(format!(
                "Mechanism '{}' returned a non-numeric value for an encoded input",
                self.inner.kind()
            ))
        })?;
        encoder.decode(output, &ctx)
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }
}
