//! Memoizing wrapper: identical inputs anonymize identically

use super::Mechanism;
use crate::domain::Result;
use std::collections::HashMap;

/// Remembers every output of the wrapped mechanism
///
/// On a cache hit the wrapped mechanism is not called at all, so side effects such
/// as a pseudonym counter do not advance. The cache is unbounded and lives as long
/// as the wrapper.
#[derive(Debug)]
pub struct Stateful<M> {
    inner: M,
    cache: HashMap<String, String>,
}

impl<M: Mechanism> Stateful<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }

    /// Number of distinct inputs seen so far
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Mechanism> Mechanism for Stateful<M> {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        if let Some(output) = self.cache.get(input) {
            tracing::trace!(mechanism = self.inner.kind(), cache_hit = true, "Memoized");
            return Ok(output.clone());
        }

        let output = self.inner.anonymize(input)?;
        self.cache.insert(input.to_string(), output.clone());
        tracing::trace!(mechanism = self.inner.kind(), cache_hit = false, "Memoized");
        Ok(output)
    }

    fn kind(&self) -> &'static str {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnonymizerError;
    use crate::mechanisms::{LaplaceNoise, Pseudonymization};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cache_hit_does_not_advance_counter() {
        let mut mechanism = Stateful::new(Pseudonymization::new("Bar {}", 1).unwrap());
        assert_eq!(mechanism.anonymize("Gamma").unwrap(), "Bar 1");
        assert_eq!(mechanism.anonymize("Gamma").unwrap(), "Bar 1");
        assert_eq!(mechanism.inner().counter(), 2);

        assert_eq!(mechanism.anonymize("Delta").unwrap(), "Bar 2");
        assert_eq!(mechanism.inner().counter(), 3);
        assert_eq!(mechanism.cache_len(), 2);
    }

    #[test]
    fn test_random_mechanism_becomes_consistent() {
        let noise = LaplaceNoise::new(1.0, 1.0)
            .unwrap()
            .with_rng(StdRng::seed_from_u64(3));
        let mut mechanism = Stateful::new(noise);
        let first = mechanism.anonymize("10").unwrap();
        for _ in 0..5 {
            assert_eq!(mechanism.anonymize("10").unwrap(), first);
        }
        assert_ne!(mechanism.anonymize("11").unwrap(), first);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let noise = LaplaceNoise::new(1.0, 1.0).unwrap();
        let mut mechanism = Stateful::new(noise);
        assert!(matches!(
            mechanism.anonymize("abc"),
            Err(AnonymizerError::InvalidInput(_))
        ));
        assert_eq!(mechanism.cache_len(), 0);
    }

    #[test]
    fn test_kind_delegates() {
        let mechanism = Stateful::new(Pseudonymization::new("{}", 1).unwrap());
        assert_eq!(mechanism.kind(), "pseudonymization");
    }
}
