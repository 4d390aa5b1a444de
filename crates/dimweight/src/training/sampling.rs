//! Row and column sampling for training.
//!
//! - `subsample`: rows drawn without replacement once per tree
//! - `colsample_bytree`: features drawn without replacement once per tree
//!
//! Both draw from the trainer's random stream and return sorted indices. A
//! rate of 1.0 returns everything without touching the stream, so training
//! without sampling is independent of the stream state.

use rand::Rng;
use rand::seq::index;

// ============================================================================
// RowSampler
// ============================================================================

/// Samples rows without replacement for each boosting round.
#[derive(Debug, Clone)]
pub struct RowSampler {
    n_rows: usize,
    subsample: f64,
}

impl RowSampler {
    pub fn new(n_rows: usize, subsample: f64) -> Self {
        debug_assert!(subsample > 0.0 && subsample <= 1.0);
        Self { n_rows, subsample }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.subsample < 1.0
    }

    /// Rows kept per round: `ceil(n_rows · subsample)`, at least one.
    pub fn sample_size(&self) -> usize {
        if !self.is_enabled() {
            return self.n_rows;
        }
        (((self.n_rows as f64) * self.subsample).ceil() as usize).clamp(1, self.n_rows.max(1))
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        if !self.is_enabled() {
            return (0..self.n_rows as u32).collect();
        }
        sorted_sample(rng, self.n_rows, self.sample_size())
    }
}

// ============================================================================
// ColSampler
// ============================================================================

/// Samples features once per tree.
#[derive(Debug, Clone)]
pub struct ColSampler {
    n_features: usize,
    colsample_bytree: f64,
}

impl ColSampler {
    pub fn new(n_features: usize, colsample_bytree: f64) -> Self {
        debug_assert!(colsample_bytree > 0.0 && colsample_bytree <= 1.0);
        Self {
            n_features,
            colsample_bytree,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.colsample_bytree < 1.0
    }

    /// Features kept per tree: `ceil(n_features · colsample_bytree)`, at least one.
    pub fn sample_size(&self) -> usize {
        if !self.is_enabled() {
            return self.n_features;
        }
        (((self.n_features as f64) * self.colsample_bytree).ceil() as usize)
            .clamp(1, self.n_features.max(1))
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        if !self.is_enabled() {
            return (0..self.n_features).collect();
        }
        let mut features = index::sample(rng, self.n_features, self.sample_size()).into_vec();
        features.sort_unstable();
        features
    }
}

fn sorted_sample<R: Rng + ?Sized>(rng: &mut R, length: usize, amount: usize) -> Vec<u32> {
    let mut rows: Vec<u32> = index::sample(rng, length, amount)
        .iter()
        .map(|i| i as u32)
        .collect();
    rows.sort_unstable();
    rows
}
