//! Conditional discrete probability distributions

use super::cumulative::CumulativeDistribution;
use super::DistributionWeights;
use crate::domain::{AnonymizerError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Weights {
    /// `n` equally likely outcomes, independent of the input
    Uniform(usize),
    /// One row shared by every input
    Vector(Vec<f64>),
    /// One row per input, `n x n`
    Matrix(Vec<Vec<f64>>),
}

/// A (conditional) discrete probability distribution
///
/// Stores `P(output = j | input = i)`. Every row sums to 1 once the distribution is
/// constructed. Rows may contain negative weights before normalization, but such
/// rows are rejected when the cumulative form is built.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistribution {
    weights: Weights,
}

impl DiscreteDistribution {
    /// Create a normalized distribution from raw weights
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidDistribution`] if the weights are empty, a
    /// matrix is not square, or a row sums to zero.
    pub fn new(weights: DistributionWeights) -> Result<Self> {
        match weights {
            DistributionWeights::Vector(row) => Self::from_vector(row),
            DistributionWeights::Matrix(rows) => Self::from_matrix(rows),
        }
    }

    /// Create an input-independent distribution from a list of weights
    pub fn from_vector(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(AnonymizerError::InvalidDistribution(
                "Cannot create an empty probability distribution".to_string(),
            ));
        }

        let mut distribution = Self {
            weights: Weights::Vector(weights),
        };
        distribution.normalize()?;
        Ok(distribution)
    }

    /// Create a conditional distribution from a square matrix of weights
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(AnonymizerError::InvalidDistribution(
                "Cannot create an empty probability distribution".to_string(),
            ));
        }

        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(AnonymizerError::InvalidDistribution(format!(
                "Matrix must be square: row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }

        let mut distribution = Self {
            weights: Weights::Matrix(rows),
        };
        distribution.normalize()?;
        Ok(distribution)
    }

    /// Uniform distribution over `n` outcomes
    ///
    /// Only the size is stored; the `n x n` matrix is materialized on demand.
    pub fn uniform(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(AnonymizerError::InvalidDistribution(
                "Uniform distribution needs at least one outcome".to_string(),
            ));
        }
        Ok(Self {
            weights: Weights::Uniform(n),
        })
    }

    /// Randomized response distribution satisfying ε-differential privacy over `t` values
    ///
    /// The true value is reported with probability `e^ε / (t - 1 + e^ε)` and every
    /// other value with probability `1 / (t - 1 + e^ε)`.
    pub fn with_epsilon(t: usize, epsilon: f64) -> Result<Self> {
        if t == 0 {
            return Err(AnonymizerError::InvalidDistribution(
                "Differential privacy distribution needs at least one value".to_string(),
            ));
        }
        if !epsilon.is_finite() {
            return Err(AnonymizerError::InvalidDistribution(format!(
                "Epsilon must be finite, got {epsilon}"
            )));
        }

        let others = (t - 1) as f64;
        // Divide through by e^ε for positive ε so large values don't overflow.
        let (p_ii, p_ij) = if epsilon >= 0.0 {
            let e_neg = (-epsilon).exp();
            let denominator = others * e_neg + 1.0;
            (1.0 / denominator, e_neg / denominator)
        } else {
            let e_eps = epsilon.exp();
            let denominator = others + e_eps;
            (e_eps / denominator, 1.0 / denominator)
        };

        let rows = (0..t)
            .map(|i| (0..t).map(|j| if i == j { p_ii } else { p_ij }).collect())
            .collect();

        Ok(Self {
            weights: Weights::Matrix(rows),
        })
    }

    /// Divide every row by the absolute value of its sum
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidDistribution`] if a row is empty, contains a
    /// non-finite weight, or sums to zero.
    pub fn normalize(&mut self) -> Result<()> {
        match &mut self.weights {
            Weights::Uniform(_) => Ok(()),
            Weights::Vector(row) => normalize_row(row, 0),
            Weights::Matrix(rows) => rows
                .iter_mut()
                .enumerate()
                .try_for_each(|(i, row)| normalize_row(row, i)),
        }
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        match &self.weights {
            Weights::Uniform(n) => *n,
            Weights::Vector(row) => row.len(),
            Weights::Matrix(rows) => rows.len(),
        }
    }

    /// Always false for a constructed distribution
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the distribution depends on the input value
    pub fn is_matrix(&self) -> bool {
        matches!(self.weights, Weights::Matrix(_))
    }

    /// Probability of output `j` given input `i`
    ///
    /// Returns `None` if either index is out of range.
    pub fn probability(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        if i >= n || j >= n {
            return None;
        }
        match &self.weights {
            Weights::Uniform(n) => Some(1.0 / *n as f64),
            Weights::Vector(row) => row.get(j).copied(),
            Weights::Matrix(rows) => rows.get(i).and_then(|row| row.get(j)).copied(),
        }
    }

    /// Full `n x n` matrix representation
    ///
    /// Input-independent distributions repeat their row; matrices are returned as-is.
    pub fn to_full_matrix(&self) -> Self {
        let rows = match &self.weights {
            Weights::Uniform(n) => vec![vec![1.0 / *n as f64; *n]; *n],
            Weights::Vector(row) => vec![row.clone(); row.len()],
            Weights::Matrix(_) => return self.clone(),
        };
        Self {
            weights: Weights::Matrix(rows),
        }
    }

    /// Combine with a randomized response coin toss
    ///
    /// With probability `p` the true value is reported, otherwise an output is drawn
    /// from `self`. The result has `p + (1 - p) * p_ii` on the diagonal and
    /// `(1 - p) * p_ij` elsewhere. `self` is left untouched.
    pub fn with_randomized_response_toss(&self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(AnonymizerError::InvalidDistribution(format!(
                "Truth probability must be within [0, 1], got {p}"
            )));
        }

        let mut full = self.to_full_matrix();
        if let Weights::Matrix(rows) = &mut full.weights {
            for (i, row) in rows.iter_mut().enumerate() {
                for (j, weight) in row.iter_mut().enumerate() {
                    *weight *= 1.0 - p;
                    if i == j {
                        *weight += p;
                    }
                }
            }
        }
        Ok(full)
    }

    /// Prefix-summed form used for sampling
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidDistribution`] if a cumulative row decreases,
    /// which happens when a row keeps a negative weight after normalization.
    pub fn to_cumulative(&self) -> Result<CumulativeDistribution> {
        match &self.weights {
            Weights::Uniform(n) => Ok(CumulativeDistribution::uniform(*n)),
            Weights::Vector(row) => Ok(CumulativeDistribution::from_row(accumulate(row, 0)?)),
            Weights::Matrix(rows) => {
                let cumulative = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| accumulate(row, i))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CumulativeDistribution::from_rows(cumulative))
            }
        }
    }
}

fn normalize_row(row: &mut [f64], index: usize) -> Result<()> {
    if row.is_empty() {
        return Err(AnonymizerError::InvalidDistribution(format!(
            "Row {index} has no weights"
        )));
    }
    if row.iter().any(|w| !w.is_finite()) {
        return Err(AnonymizerError::InvalidDistribution(format!(
            "Row {index} contains a non-finite weight"
        )));
    }

    let total = row.iter().sum::<f64>().abs();
    if total == 0.0 {
        return Err(AnonymizerError::InvalidDistribution(format!(
            "Weights of row {index} sum to zero"
        )));
    }

    for weight in row.iter_mut() {
        *weight /= total;
    }
    Ok(())
}

fn accumulate(row: &[f64], index: usize) -> Result<Vec<f64>> {
    let mut cumulative = Vec::with_capacity(row.len());
    let mut running = 0.0;
    for weight in row {
        let next = running + weight;
        if next < running {
            return Err(AnonymizerError::InvalidDistribution(format!(
                "Cumulative weights of row {index} are not monotonically non-decreasing"
            )));
        }
        running = next;
        cumulative.push(running);
    }

    if running <= 0.0 {
        return Err(AnonymizerError::InvalidDistribution(format!(
            "Row {index} has no positive probability mass"
        )));
    }
    Ok(cumulative)
}
