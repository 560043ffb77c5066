//! Dissimilarity metrics over dense `f64` points.
//!
//! The engine addresses points by index only; these kernels are the sole
//! place raw coordinates are touched. Metrics form a closed set selected by
//! name at `fit` time.
//!
//! Accepted names are case-insensitive: `"L1"` / `"manhattan"`,
//! `"L2"` / `"euclidean"`, `"Linf"` / `"chebyshev"`. A bare Lp suffix
//! (`"1"`, `"2"`, `"inf"`) is also accepted.

use crate::error::{KMedoidsError, Result};

/// Dissimilarity metric for dense points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// Sum of absolute differences (Manhattan).
    L1,
    /// Euclidean distance.
    L2,
    /// Maximum absolute difference (Chebyshev).
    LInf,
}

impl Metric {
    /// Parse a metric name.
    ///
    /// Returns [`KMedoidsError::UnsupportedMetric`] for names outside the
    /// supported set.
    pub fn parse(name: &str) -> Result<Self> {
        // A leading `L`/`l` on the numeric loss names is optional.
        match name.to_ascii_lowercase().as_str() {
            "l1" | "1" | "manhattan" => Ok(Metric::L1),
            "l2" | "2" | "euclidean" => Ok(Metric::L2),
            "linf" | "inf" | "chebyshev" => Ok(Metric::LInf),
            _ => Err(KMedoidsError::UnsupportedMetric(name.to_string())),
        }
    }

    /// Compute the distance between two points.
    #[inline]
    #[must_use]
    pub fn distance(self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Metric::L1 => l1_distance(a, b),
            Metric::L2 => l2_distance(a, b),
            Metric::LInf => linf_distance(a, b),
        }
    }

    /// Canonical name, as accepted by [`Metric::parse`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::L1 => "L1",
            Metric::L2 => "L2",
            Metric::LInf => "Linf",
        }
    }
}

/// L1 (Manhattan) distance.
#[inline]
#[must_use]
pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// L2 (Euclidean) distance.
#[inline]
#[must_use]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    l2_distance_squared(a, b).sqrt()
}

/// L2 distance squared (faster when only comparing distances).
#[inline]
#[must_use]
pub fn l2_distance_squared(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// L∞ (Chebyshev) distance.
#[inline]
#[must_use]
pub fn linf_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
