//! Cumulative form of a discrete distribution, used for sampling

use crate::domain::{AnonymizerError, Result};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
enum Rows {
    Uniform(usize),
    Single(Vec<f64>),
    PerInput(Vec<Vec<f64>>),
}

/// Prefix sums of a [`DiscreteDistribution`](super::DiscreteDistribution)
///
/// Built once, never mutated, and sampled in `O(log n)` per draw.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistribution {
    rows: Rows,
}

impl CumulativeDistribution {
    pub(super) fn uniform(n: usize) -> Self {
        Self {
            rows: Rows::Uniform(n),
        }
    }

    pub(super) fn from_row(row: Vec<f64>) -> Self {
        Self {
            rows: Rows::Single(row),
        }
    }

    pub(super) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self {
            rows: Rows::PerInput(rows),
        }
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        match &self.rows {
            Rows::Uniform(n) => *n,
            Rows::Single(row) => row.len(),
            Rows::PerInput(rows) => rows.len(),
        }
    }

    /// Always false for a constructed distribution
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw an output index given the index of the input value
    ///
    /// The draw is a uniform value in `[0, row_total)` located by binary search in
    /// the cumulative row of `input_index`. Input-independent distributions use
    /// their single row for every input.
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidInput`] if `input_index` is out of range.
    pub fn sample<R: Rng + ?Sized>(&self, input_index: usize, rng: &mut R) -> Result<usize> {
        let n = self.len();
        if input_index >= n {
            return Err(AnonymizerError::InvalidInput(format!(
                "Input index {input_index} out of range for a distribution over {n} values"
            )));
        }

        match &self.rows {
            Rows::Uniform(n) => Ok(rng.gen_range(0..*n)),
            Rows::Single(row) => Ok(sample_row(row, rng)),
            Rows::PerInput(rows) => Ok(sample_row(&rows[input_index], rng)),
        }
    }
}

fn sample_row<R: Rng + ?Sized>(row: &[f64], rng: &mut R) -> usize {
    let total = row[row.len() - 1];
    let draw = rng.gen::<f64>() * total;

    let index = row.partition_point(|&c| c <= draw);
    if index < row.len() {
        index
    } else {
        // Rounding pushed the draw onto the total: take the last outcome with mass
        row.partition_point(|&c| c < total)
    }
}
