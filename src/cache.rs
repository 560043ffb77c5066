//! Concurrent distance cache.
//!
//! Maps an unordered pair of point indices to a previously computed
//! distance so BUILD and SWAP rounds never pay for the same pair twice.
//! The cache is tagged with the (dataset fingerprint, metric) pair it was
//! filled under; the engine retains it across `fit` calls only while that
//! tag still matches.
//!
//! Uses `DashMap` so worker threads can read and insert without a global
//! lock. Two workers racing to fill the same missing pair both compute the
//! same value, so the duplicate insert is an idempotent overwrite.

use dashmap::DashMap;

use crate::distance::Metric;

/// Pack an unordered index pair into a single map key.
///
/// Symmetry of the metric means (i, j) and (j, i) share an entry.
#[inline]
fn pair_key(i: usize, j: usize) -> u64 {
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    // The packing holds 32 bits per index; no in-memory dataset gets close,
    // but a silent collision would be unacceptable.
    debug_assert!((hi as u64) < (1u64 << 32));
    ((lo as u64) << 32) | hi as u64
}

/// Reusable store of computed pairwise distances.
#[derive(Debug)]
pub struct DistanceCache {
    entries: DashMap<u64, f64>,
    fingerprint: u64,
    metric: Metric,
}

impl DistanceCache {
    /// Create an empty cache bound to a (dataset fingerprint, metric) pair.
    #[must_use]
    pub fn new(fingerprint: u64, metric: Metric) -> Self {
        Self {
            entries: DashMap::new(),
            fingerprint,
            metric,
        }
    }

    /// True when this cache was filled under the given dataset and metric
    /// and may be reused as-is.
    #[must_use]
    pub fn matches(&self, fingerprint: u64, metric: Metric) -> bool {
        self.fingerprint == fingerprint && self.metric == metric
    }

    /// Look up the distance for an unordered index pair.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.entries.get(&pair_key(i, j)).map(|v| *v)
    }

    /// Store the distance for an unordered index pair.
    #[inline]
    pub fn insert(&self, i: usize, j: usize, dist: f64) {
        self.entries.insert(pair_key(i, j), dist);
    }

    /// Number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no pair has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_symmetric() {
        assert_eq!(pair_key(3, 7), pair_key(7, 3));
        assert_ne!(pair_key(3, 7), pair_key(3, 8));
    }

    #[test]
    fn insert_then_get_either_order() {
        let cache = DistanceCache::new(1, Metric::L2);
        cache.insert(2, 5, 1.25);
        assert_eq!(cache.get(2, 5), Some(1.25));
        assert_eq!(cache.get(5, 2), Some(1.25));
        assert_eq!(cache.get(2, 6), None);
    }

    #[test]
    fn matches_requires_both_tags() {
        let cache = DistanceCache::new(42, Metric::L1);
        assert!(cache.matches(42, Metric::L1));
        assert!(!cache.matches(42, Metric::L2));
        assert!(!cache.matches(41, Metric::L1));
    }

    #[test]
    fn concurrent_inserts_do_not_corrupt() {
        use std::sync::Arc;
        let cache = Arc::new(DistanceCache::new(0, Metric::L2));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100usize {
                        c.insert(i, i + 1, (i as f64) * 0.5);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        for i in 0..100usize {
            assert_eq!(cache.get(i, i + 1), Some((i as f64) * 0.5));
        }
    }
}
