//! Laplace noise for numeric values
//!
//! Adds noise drawn from `Laplace(0, sensitivity / epsilon)`, which makes a query
//! with the given L1 sensitivity ε-differentially private.

use super::Mechanism;
use crate::domain::{AnonymizerError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const KIND: &str = "laplaceNoise";

fn default_sensitivity() -> f64 {
    1.0
}

/// Parameters of [`LaplaceNoise`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaplaceNoiseConfig {
    /// Privacy budget, must be positive
    pub epsilon: f64,

    /// L1 sensitivity of the value, must be positive
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
}

impl LaplaceNoiseConfig {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            sensitivity: default_sensitivity(),
        }
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("epsilon", self.epsilon)?;
        check_positive("sensitivity", self.sensitivity)?;
        let scale = self.sensitivity / self.epsilon;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(AnonymizerError::InvalidConfig(format!(
                "Noise scale sensitivity / epsilon must be finite and positive, got {scale}"
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<LaplaceNoise> {
        LaplaceNoise::new(self.epsilon, self.sensitivity)
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnonymizerError::InvalidConfig(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

/// Adds Laplace noise to numbers
///
/// The noise is the difference of two independent exponential draws with mean
/// `sensitivity / epsilon`.
pub struct LaplaceNoise {
    scale: f64,
    exp: Exp<f64>,
    rng: Box<dyn RngCore + Send>,
}

impl LaplaceNoise {
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`] unless both parameters are finite
    /// and positive.
    pub fn new(epsilon: f64, sensitivity: f64) -> Result<Self> {
        LaplaceNoiseConfig {
            epsilon,
            sensitivity,
        }
        .validate()?;

        let scale = sensitivity / epsilon;
        let exp = Exp::new(1.0 / scale).map_err(|e| {
            AnonymizerError::InvalidConfig(format!("Invalid noise scale {scale}: {e}"))
        })?;

        Ok(Self {
            scale,
            exp,
            rng: Box::new(OsRng),
        })
    }

    /// Replace the random source
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Scale `b` of the Laplace distribution
    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn noise(&mut self) -> f64 {
        self.exp.sample(&mut self.rng) - self.exp.sample(&mut self.rng)
    }
}

impl fmt::Debug for LaplaceNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaplaceNoise")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl Mechanism for LaplaceNoise {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        let value: f64 = input
            .trim()
            .parse()
            .map_err(|_| AnonymizerError::InvalidInput("Input is not a number".to_string()))?;
        if !value.is_finite() {
            return Err(AnonymizerError::InvalidInput(
                "Input is not a finite number".to_string(),
            ));
        }

        Ok((value + self.noise()).to_string())
    }

    fn kind(&self) -> &'static str {
        KIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(epsilon: f64, sensitivity: f64) -> LaplaceNoise {
        LaplaceNoise::new(epsilon, sensitivity)
            .unwrap()
            .with_rng(StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_scale() {
        assert_eq!(seeded(2.0, 1.0).scale(), 0.5);
        assert_eq!(LaplaceNoiseConfig::new(0.5).build().unwrap().scale(), 2.0);
    }

    #[test]
    fn test_output_is_numeric_and_varies() {
        let mut mechanism = seeded(1.0, 1.0);
        let outputs: Vec<f64> = (0..10)
            .map(|_| mechanism.anonymize("42").unwrap().parse().unwrap())
            .collect();
        assert!(outputs.iter().all(|v| v.is_finite()));
        assert!(outputs.iter().any(|v| *v != outputs[0]));
    }

    #[test]
    fn test_noise_statistics() {
        // Laplace(0, b): mean 0, mean absolute deviation b
        let mut mechanism = seeded(1.0, 2.0);
        let draws = 20_000;
        let noise: Vec<f64> = (0..draws)
            .map(|_| mechanism.anonymize("0").unwrap().parse::<f64>().unwrap())
            .collect();
        let mean = noise.iter().sum::<f64>() / draws as f64;
        let mad = noise.iter().map(|v| v.abs()).sum::<f64>() / draws as f64;
        assert!(mean.abs() < 0.1, "mean was {mean}");
        assert!((mad - 2.0).abs() < 0.1, "mean absolute deviation was {mad}");
    }

    #[test]
    fn test_input_is_trimmed() {
        let mut mechanism = seeded(1e9, 1.0);
        let output: f64 = mechanism.anonymize(" 12.5 \n").unwrap().parse().unwrap();
        assert!((output - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_numeric_input() {
        let mut mechanism = seeded(1.0, 1.0);
        for input in ["abc", "", "12,5", "NaN", "inf"] {
            assert!(
                matches!(
                    mechanism.anonymize(input),
                    Err(AnonymizerError::InvalidInput(_))
                ),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_parameters() {
        for (epsilon, sensitivity) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (f64::NAN, 1.0)] {
            assert!(matches!(
                LaplaceNoise::new(epsilon, sensitivity),
                Err(AnonymizerError::InvalidConfig(_))
            ));
        }
        assert!(LaplaceNoiseConfig::new(1e-320).validate().is_err());
    }
}
