//! Deterministic dataset generation.
//!
//! PCG-backed so that a seed always produces the same bars, across runs and
//! platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::config::DataSize;

/// Seeded generator for chart datasets.
#[derive(Debug, Clone)]
pub struct DataRng {
    /// Master seed for reproducibility.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl DataRng {
    /// Create a new generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate `len` raw values uniformly in `1..=max_value`.
    ///
    /// Values are wrapped in `Some` so they flow through the same filtering
    /// path as externally supplied input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortviz::engine::rng::DataRng;
    ///
    /// let mut rng = DataRng::new(42);
    /// let data = rng.dataset(10, 100);
    /// assert_eq!(data.len(), 10);
    /// ```
    pub fn dataset(&mut self, len: usize, max_value: u32) -> Vec<Option<u32>> {
        let max_value = max_value.max(1);
        (0..len)
            .map(|_| Some(self.rng.gen_range(1..=max_value)))
            .collect()
    }

    /// Generate a dataset for a selector size.
    pub fn dataset_for(&mut self, size: DataSize, max_value: u32) -> Vec<Option<u32>> {
        self.dataset(size.len(), max_value)
    }
}
