//! Reference-point sampling order.
//!
//! The bandit estimator draws reference points in batches, without
//! replacement, from a permutation of `0..n`. In fixed mode the permutation
//! is a seeded Fisher–Yates shuffle, so repeated runs on identical input
//! are bit-identical; otherwise each generator draws a fresh entropy seed.
//!
//! The permutation is shared by every arm in a round and consumed in order,
//! so results never depend on how the per-arm work was scheduled across
//! worker threads.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Produces the order in which reference points are sampled.
#[derive(Debug, Clone)]
pub struct PermutationGenerator {
    order: Vec<usize>,
    cursor: usize,
}

impl PermutationGenerator {
    /// Deterministic permutation of `0..n` from an explicit seed.
    #[must_use]
    pub fn fixed(n: usize, seed: u64) -> Self {
        Self::with_rng(n, StdRng::seed_from_u64(seed))
    }

    /// Fresh random permutation of `0..n`, independent per call.
    #[must_use]
    pub fn random(n: usize) -> Self {
        Self::with_rng(n, StdRng::seed_from_u64(rand::rng().random()))
    }

    fn with_rng(n: usize, mut rng: StdRng) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rng);
        Self { order, cursor: 0 }
    }

    /// Total number of reference points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the index range is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Restart the sequence for the next arm-evaluation run.
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// True once every reference point has been drawn since the last reset.
    #[inline]
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Draw the next batch of up to `n` reference points without
    /// replacement. Returns an empty slice once exhausted.
    pub fn next_batch(&mut self, n: usize) -> &[usize] {
        let start = self.cursor;
        let end = (start + n).min(self.order.len());
        self.cursor = end;
        &self.order[start..end]
    }
}
