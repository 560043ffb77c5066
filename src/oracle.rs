//! Distance oracle: the engine's only source of pairwise dissimilarities.
//!
//! Wraps a dataset and a metric, with optional write-through memoization
//! into a shared [`DistanceCache`]. The cache is passed in explicitly by
//! the engine that owns it, never held as module state.

use std::sync::Arc;

use crate::cache::DistanceCache;
use crate::dataset::Dataset;
use crate::distance::Metric;
use crate::error::Result;

/// Bounds-checked, optionally memoized distance computation.
pub struct DistanceOracle<'a> {
    dataset: &'a Dataset,
    metric: Metric,
    cache: Option<Arc<DistanceCache>>,
}

impl<'a> DistanceOracle<'a> {
    /// Create an oracle over `dataset` under `metric`.
    ///
    /// When `cache` is provided it must already be tagged for this
    /// (dataset, metric) pair; the engine guarantees that before handing
    /// it over.
    #[must_use]
    pub fn new(dataset: &'a Dataset, metric: Metric, cache: Option<Arc<DistanceCache>>) -> Self {
        debug_assert!(cache
            .as_ref()
            .map(|c| c.matches(dataset.fingerprint(), metric))
            .unwrap_or(true));
        Self {
            dataset,
            metric,
            cache,
        }
    }

    /// Number of points visible to the oracle.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// True when the underlying dataset is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Active metric.
    #[inline]
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Distance between points `i` and `j`.
    ///
    /// Fails with [`crate::KMedoidsError::InvalidIndex`] when either index
    /// is out of range. Symmetry and d(i, i) = 0 come from the metric
    /// itself; the cache assumes them but does not enforce them.
    pub fn distance(&self, i: usize, j: usize) -> Result<f64> {
        if let Some(cache) = &self.cache {
            if let Some(d) = cache.get(i, j) {
                return Ok(d);
            }
        }
        let a = self.dataset.point(i)?;
        let b = self.dataset.point(j)?;
        let d = self.metric.distance(a, b);
        if let Some(cache) = &self.cache {
            cache.insert(i, j, d);
        }
        Ok(d)
    }
}
