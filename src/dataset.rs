//! In-memory dataset with flat (structure-of-arrays) storage.
//!
//! Points are addressed by index throughout the engine; no coordinates are
//! ever copied into clustering state. The dataset is immutable for the
//! duration of a fit.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{KMedoidsError, Result};

/// An ordered sequence of N fixed-length `f64` points.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Flat row-major storage, `n * dim` values.
    data: Vec<f64>,
    n: usize,
    dim: usize,
    /// Content hash, used to decide whether a retained distance cache is
    /// still valid for this dataset.
    fingerprint: u64,
}

impl Dataset {
    /// Build a dataset from row vectors.
    ///
    /// Fails with [`KMedoidsError::EmptyDataset`] on zero rows and
    /// [`KMedoidsError::DimensionMismatch`] on ragged input. Rows of width
    /// zero are rejected as empty.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(KMedoidsError::EmptyDataset);
        }
        let dim = rows[0].len();
        if dim == 0 {
            return Err(KMedoidsError::EmptyDataset);
        }
        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != dim {
                return Err(KMedoidsError::DimensionMismatch {
                    row,
                    expected: dim,
                    got: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        let fingerprint = hash_values(&data, rows.len(), dim);
        Ok(Self {
            data,
            n: rows.len(),
            dim,
            fingerprint,
        })
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when the dataset holds no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Point dimensionality.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Content fingerprint for cache-validity checks.
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Borrow the coordinates of point `idx`.
    ///
    /// Fails with [`KMedoidsError::InvalidIndex`] when out of range.
    #[inline]
    pub fn point(&self, idx: usize) -> Result<&[f64]> {
        if idx >= self.n {
            return Err(KMedoidsError::InvalidIndex {
                index: idx,
                len: self.n,
            });
        }
        let start = idx * self.dim;
        Ok(&self.data[start..start + self.dim])
    }
}

fn hash_values(data: &[f64], n: usize, dim: usize) -> u64 {
    let mut h = DefaultHasher::new();
    n.hash(&mut h);
    dim.hash(&mut h);
    for v in data {
        v.to_bits().hash(&mut h);
    }
    h.finish()
}
