//! Discrete probability distributions for randomized mechanisms
//!
//! A [`DiscreteDistribution`] stores the probabilities `P(output = j | input = i)`.
//! Distributions that do not depend on the input are kept as a single row, and the
//! uniform distribution is kept as just its size.
//!
//! Sampling goes through the prefix-summed [`CumulativeDistribution`], which is built
//! once and reused for every draw. The random source is always passed in by the caller.
//!
//! ```rust
//! use pii_anonymizer::distribution::DiscreteDistribution;
//! use rand::rngs::OsRng;
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! // Report the truth with probability 0.75, otherwise answer uniformly at random
//! let distribution = DiscreteDistribution::uniform(2)?.with_randomized_response_toss(0.5)?;
//! let cumulative = distribution.to_cumulative()?;
//! let output = cumulative.sample(0, &mut OsRng)?;
//! assert!(output < 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cumulative;
pub mod discrete;

pub use cumulative::CumulativeDistribution;
pub use discrete::DiscreteDistribution;

use serde::{Deserialize, Serialize};

/// Raw probability weights as written in a configuration
///
/// A vector holds weights independent of the input, a matrix holds one row of
/// weights per input value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistributionWeights {
    /// Input-independent weights
    Vector(Vec<f64>),
    /// Square matrix, row i holds the weights given input i
    Matrix(Vec<Vec<f64>>),
}

impl DistributionWeights {
    /// Number of outcomes described by the weights
    pub fn len(&self) -> usize {
        match self {
            Self::Vector(weights) => weights.len(),
            Self::Matrix(rows) => rows.len(),
        }
    }

    /// Whether there are no weights at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_deserialize_vector() {
        let weights: DistributionWeights = serde_json::from_str("[1, 0.5, 2]").unwrap();
        assert_eq!(weights, DistributionWeights::Vector(vec![1.0, 0.5, 2.0]));
        assert_eq!(weights.len(), 3);
    }

    #[test]
    fn test_weights_deserialize_matrix() {
        let weights: DistributionWeights = serde_json::from_str("[[1, 0], [0, 1]]").unwrap();
        assert_eq!(
            weights,
            DistributionWeights::Matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        );
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_weights_empty() {
        let weights: DistributionWeights = serde_json::from_str("[]").unwrap();
        assert!(weights.is_empty());
    }
}
