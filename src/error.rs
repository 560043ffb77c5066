//! Error types for kmedo.

use thiserror::Error;

/// Errors that can occur while configuring or fitting a k-medoids engine.
///
/// All input errors are detected eagerly at the start of `fit`, before any
/// distance is sampled; a failed fit leaves the engine's medoid fields at
/// their prior values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KMedoidsError {
    /// `fit` was called with a dataset containing zero rows.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A point index fell outside `[0, n_points)`.
    #[error("point index {index} out of range for {len} points")]
    InvalidIndex { index: usize, len: usize },

    /// The requested metric name is not in the supported set.
    #[error("unsupported metric: {0:?}")]
    UnsupportedMetric(String),

    /// The requested algorithm name is not in the supported set.
    #[error("unknown algorithm: {0:?} (expected \"BanditPAM\" or \"naive\")")]
    UnknownAlgorithm(String),

    /// The requested number of medoids cannot be satisfied by the dataset.
    #[error("insufficient data: requested {k} medoids from {n} points")]
    InsufficientData { k: usize, n: usize },

    /// A dataset row had a different length than the first row.
    #[error("row {row} has {got} columns, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Writing to the fit log target failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A parallel work unit failed after its one internal retry.
    #[error("worker failure: {0}")]
    WorkerFailure(String),
}

impl From<std::io::Error> for KMedoidsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KMedoidsError>;
