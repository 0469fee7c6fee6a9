//! Randomized response for categorical values
//!
//! Each input is replaced by a category sampled from a conditional distribution
//! `P(output | input)`. Three ways to obtain that distribution are supported:
//!
//! - `custom`: weights given directly, as a vector or a square matrix
//! - `coin`: report the truth with probability `coin_p`, otherwise sample from a
//!   base distribution (uniform unless given)
//! - `dp`: the ε-differentially private construction for the given `epsilon`

use super::Mechanism;
use crate::distribution::{CumulativeDistribution, DiscreteDistribution, DistributionWeights};
use crate::domain::{AnonymizerError, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub(crate) const KIND: &str = "randomizedResponse";

/// How the response distribution is constructed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Weights given in `distribution`
    #[default]
    Custom,
    /// Biased coin toss with probability `coin_p` of telling the truth
    Coin,
    /// ε-differential privacy with parameter `epsilon`
    Dp,
}

impl ResponseMode {
    fn name(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Coin => "coin",
            Self::Dp => "dp",
        }
    }
}

/// Parameters of [`RandomizedResponse`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RandomizedResponseConfig {
    /// Ordered category labels
    pub values: Vec<String>,

    #[serde(default)]
    pub mode: ResponseMode,

    /// Vector of `n` weights or `n x n` matrix, rows indexed by the true value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionWeights>,

    /// Probability of reporting the true value in coin mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_p: Option<f64>,

    /// Privacy parameter in dp mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,

    /// Output for inputs that are not one of `values`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl RandomizedResponseConfig {
    /// Custom mode with the given weights
    pub fn custom(values: Vec<String>, distribution: DistributionWeights) -> Self {
        Self {
            values,
            mode: ResponseMode::Custom,
            distribution: Some(distribution),
            ..Self::default()
        }
    }

    /// Coin mode with a uniform base distribution
    pub fn coin(values: Vec<String>, coin_p: f64) -> Self {
        Self {
            values,
            mode: ResponseMode::Coin,
            coin_p: Some(coin_p),
            ..Self::default()
        }
    }

    /// Differential privacy mode
    pub fn dp(values: Vec<String>, epsilon: f64) -> Self {
        Self {
            values,
            mode: ResponseMode::Dp,
            epsilon: Some(epsilon),
            ..Self::default()
        }
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.distribution().map(|_| ())
    }

    pub fn build(&self) -> Result<RandomizedResponse> {
        let distribution = self.distribution()?;
        RandomizedResponse::new(
            self.values.clone(),
            &distribution,
            self.default_value.clone(),
        )
    }

    /// Check the parameters and construct the response distribution
    fn distribution(&self) -> Result<DiscreteDistribution> {
        check_values(&self.values)?;
        self.check_mode_parameters()?;

        let n = self.values.len();
        if let Some(weights) = &self.distribution {
            check_shape(weights, n)?;
        }

        let distribution = match self.mode {
            ResponseMode::Custom => match &self.distribution {
                Some(weights) => DiscreteDistribution::new(weights.clone()),
                None => return Err(missing(self.mode, "distribution")),
            },
            ResponseMode::Coin => {
                let coin_p = self.coin_p.ok_or_else(|| missing(self.mode, "coin_p"))?;
                let base = match &self.distribution {
                    Some(weights) => DiscreteDistribution::new(weights.clone()),
                    None => DiscreteDistribution::uniform(n),
                };
                base.and_then(|base| base.with_randomized_response_toss(coin_p))
            }
            ResponseMode::Dp => {
                let epsilon = self.epsilon.ok_or_else(|| missing(self.mode, "epsilon"))?;
                DiscreteDistribution::with_epsilon(n, epsilon)
            }
        };

        // The cumulative form is where negative weights surface
        distribution
            .and_then(|d| d.to_cumulative().map(|_| d))
            .map_err(into_config_error)
    }

    fn check_mode_parameters(&self) -> Result<()> {
        let (allows_distribution, allows_coin_p, allows_epsilon) = match self.mode {
            ResponseMode::Custom => (true, false, false),
            ResponseMode::Coin => (true, true, false),
            ResponseMode::Dp => (false, false, true),
        };

        let foreign = [
            ("distribution", self.distribution.is_some() && !allows_distribution),
            ("coin_p", self.coin_p.is_some() && !allows_coin_p),
            ("epsilon", self.epsilon.is_some() && !allows_epsilon),
        ];
        if let Some((name, _)) = foreign.iter().find(|(_, rejected)| *rejected) {
            return Err(AnonymizerError::InvalidConfig(format!(
                "Parameter '{name}' is not used in {} mode",
                self.mode.name()
            )));
        }

        if let Some(coin_p) = self.coin_p {
            if !(0.0..=1.0).contains(&coin_p) {
                return Err(AnonymizerError::InvalidConfig(format!(
                    "coin_p must be within [0, 1], got {coin_p}"
                )));
            }
        }
        if let Some(epsilon) = self.epsilon {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(AnonymizerError::InvalidConfig(format!(
                    "epsilon must be finite and non-negative, got {epsilon}"
                )));
            }
        }
        Ok(())
    }
}

fn missing(mode: ResponseMode, name: &str) -> AnonymizerError {
    AnonymizerError::InvalidConfig(format!(
        "Parameter '{name}' is required in {} mode",
        mode.name()
    ))
}

fn into_config_error(error: AnonymizerError) -> AnonymizerError {
    match error {
        AnonymizerError::InvalidDistribution(msg) => {
            AnonymizerError::InvalidConfig(format!("Invalid response distribution: {msg}"))
        }
        other => other,
    }
}

fn check_values(values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(AnonymizerError::InvalidConfig(
            "Randomized response needs at least one value".to_string(),
        ));
    }
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    if let Some(duplicate) = values.iter().find(|v| !seen.insert(v.as_str())) {
        return Err(AnonymizerError::InvalidConfig(format!(
            "Duplicate randomized response value '{duplicate}'"
        )));
    }
    Ok(())
}

fn check_shape(weights: &DistributionWeights, n: usize) -> Result<()> {
    let matches = match weights {
        DistributionWeights::Vector(row) => row.len() == n,
        DistributionWeights::Matrix(rows) => {
            rows.len() == n && rows.iter().all(|row| row.len() == n)
        }
    };
    if matches {
        Ok(())
    } else {
        let shape = match weights {
            DistributionWeights::Vector(_) => format!("a vector of {n} weights"),
            DistributionWeights::Matrix(_) => format!("a {n}x{n} matrix"),
        };
        Err(AnonymizerError::InvalidConfig(format!(
            "Distribution for {n} values must be {shape}"
        )))
    }
}

/// Replaces a categorical value with one sampled from a response distribution
pub struct RandomizedResponse {
    values: Vec<String>,
    index: HashMap<String, usize>,
    distribution: CumulativeDistribution,
    default_value: Option<String>,
    rng: Box<dyn RngCore + Send>,
}

impl RandomizedResponse {
    /// Create a mechanism sampling from `distribution` with the operating system RNG
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`] if `values` is empty or has
    /// duplicates, or if the distribution does not have one outcome per value.
    pub fn new(
        values: Vec<String>,
        distribution: &DiscreteDistribution,
        default_value: Option<String>,
    ) -> Result<Self> {
        check_values(&values)?;
        if distribution.len() != values.len() {
            return Err(AnonymizerError::InvalidConfig(format!(
                "Distribution over {} outcomes does not fit {} values",
                distribution.len(),
                values.len()
            )));
        }
        let distribution = distribution.to_cumulative().map_err(into_config_error)?;

        let index = values
            .iter()
            .enumerate()
            .map(|(i, value)| (value.clone(), i))
            .collect();

        Ok(Self {
            values,
            index,
            distribution,
            default_value,
            rng: Box::new(OsRng),
        })
    }

    /// Replace the random source
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Category labels in distribution order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl fmt::Debug for RandomizedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomizedResponse")
            .field("values", &self.values)
            .field("distribution", &self.distribution)
            .field("default_value", &self.default_value)
            .finish_non_exhaustive()
    }
}

impl Mechanism for RandomizedResponse {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        let Some(&input_index) = self.index.get(input) else {
            return self.default_value.clone().ok_or_else(|| {
                AnonymizerError::CategoryNotFound(format!(
                    "Value is not one of the {} configured categories",
                    self.values.len()
                ))
            });
        };

        let output_index = self.distribution.sample(input_index, &mut self.rng)?;
        Ok(self.values[output_index].clone())
    }

    fn kind(&self) -> &'static str {
        KIND
    }
}
