//! The `KMedoids` clustering engine.
//!
//! Public entry point: construct with a configuration (or defaults), call
//! [`KMedoids::fit`], then read `build_medoids` / `final_medoids` (and the
//! per-point `labels` and SWAP `steps`). A failed fit leaves all outputs at
//! their prior values.

use std::sync::Arc;

use crate::bandit::Selector;
use crate::cache::DistanceCache;
use crate::dataset::Dataset;
use crate::distance::Metric;
use crate::error::{KMedoidsError, Result};
use crate::logging::FitLog;
use crate::oracle::DistanceOracle;
use crate::pam::{self, AssignmentTable};
use crate::sampling::PermutationGenerator;

/// Algorithm variant, selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Bandit-accelerated PAM: statistically bounded sampling that selects
    /// the same medoids as exhaustive PAM with high probability.
    #[default]
    BanditPam,
    /// Exhaustive PAM baseline: every arm evaluated against every
    /// reference point. Used to validate the bandit variant.
    Naive,
}

impl Algorithm {
    /// Parse an algorithm name (`"BanditPAM"` or `"naive"`,
    /// case-insensitive).
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "banditpam" => Ok(Algorithm::BanditPam),
            "naive" => Ok(Algorithm::Naive),
            _ => Err(KMedoidsError::UnknownAlgorithm(name.to_string())),
        }
    }
}

/// Configuration for a [`KMedoids`] engine.
///
/// Immutable per `fit` call; the setters on [`KMedoids`] adjust it between
/// calls.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KMedoidsConfig {
    /// Number of medoids to select.
    pub n_medoids: usize,
    /// Algorithm variant.
    pub algorithm: Algorithm,
    /// Hard cap on SWAP iterations.
    pub max_iter: usize,
    /// 0 silences the fit log; higher values enable it.
    pub verbosity: u32,
    /// File target for fit progress lines (used when `verbosity > 0`).
    /// Each fit writes one logfile, truncating any previous file under
    /// this name.
    pub log_filename: String,
    /// Memoize pairwise distances; the cache is retained across fits on
    /// the same (dataset, metric) pair.
    pub cache: bool,
    /// Deterministic reference-point order from `seed`; otherwise each fit
    /// draws a fresh random order.
    pub use_fixed_perm: bool,
    /// Seed for the fixed permutation.
    pub seed: u64,
    /// Reference points sampled per bandit round.
    pub batch_size: usize,
    /// Error budget δ for the bandit elimination bound.
    pub confidence: f64,
}

impl Default for KMedoidsConfig {
    fn default() -> Self {
        Self {
            n_medoids: 5,
            algorithm: Algorithm::BanditPam,
            max_iter: 1000,
            verbosity: 0,
            log_filename: "KMedoidsLogfile".to_string(),
            cache: true,
            use_fixed_perm: false,
            seed: 42,
            batch_size: 100,
            confidence: 1e-3,
        }
    }
}

/// k-medoids clustering engine.
///
/// # Example
///
/// ```rust
/// use kmedo::{KMedoids, KMedoidsConfig};
///
/// let rows: Vec<Vec<f64>> = (0..30)
///     .map(|i| vec![if i < 15 { 0.0 } else { 10.0 } + (i % 5) as f64 * 0.1])
///     .collect();
///
/// let mut engine = KMedoids::new(KMedoidsConfig {
///     n_medoids: 2,
///     use_fixed_perm: true,
///     ..KMedoidsConfig::default()
/// });
/// engine.fit(&rows, "L2").unwrap();
/// assert_eq!(engine.final_medoids().len(), 2);
/// ```
#[derive(Debug)]
pub struct KMedoids {
    config: KMedoidsConfig,
    build_medoids: Vec<usize>,
    final_medoids: Vec<usize>,
    labels: Vec<usize>,
    steps: usize,
    cache: Option<Arc<DistanceCache>>,
}

impl Default for KMedoids {
    fn default() -> Self {
        Self::new(KMedoidsConfig::default())
    }
}

impl KMedoids {
    /// Create an engine with the given configuration.
    ///
    /// A freshly constructed engine exposes empty `build_medoids` and
    /// `final_medoids` until the first successful fit.
    #[must_use]
    pub fn new(config: KMedoidsConfig) -> Self {
        Self {
            config,
            build_medoids: Vec::new(),
            final_medoids: Vec::new(),
            labels: Vec::new(),
            steps: 0,
            cache: None,
        }
    }

    /// Medoid indices produced by the BUILD stage of the last fit.
    #[must_use]
    pub fn build_medoids(&self) -> &[usize] {
        &self.build_medoids
    }

    /// Medoid indices after the SWAP stage of the last fit.
    #[must_use]
    pub fn final_medoids(&self) -> &[usize] {
        &self.final_medoids
    }

    /// Per-point medoid slot assignment from the last fit.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of SWAP iterations applied in the last fit.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &KMedoidsConfig {
        &self.config
    }

    /// Set the number of medoids for subsequent fits.
    pub fn set_n_medoids(&mut self, k: usize) {
        self.config.n_medoids = k;
    }

    /// Set the algorithm variant for subsequent fits.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    /// Set the SWAP iteration cap for subsequent fits.
    pub fn set_max_iter(&mut self, max_iter: usize) {
        self.config.max_iter = max_iter;
    }

    /// Set the verbosity for subsequent fits.
    pub fn set_verbosity(&mut self, verbosity: u32) {
        self.config.verbosity = verbosity;
    }

    /// Set the fit-log file target for subsequent fits.
    pub fn set_log_filename(&mut self, path: impl Into<String>) {
        self.config.log_filename = path.into();
    }

    /// Fit the configured number of medoids to `rows` under `metric`.
    ///
    /// Validates everything eagerly: fails with
    /// [`KMedoidsError::EmptyDataset`] on zero rows,
    /// [`KMedoidsError::DimensionMismatch`] on ragged rows,
    /// [`KMedoidsError::UnsupportedMetric`] on an unknown metric name, and
    /// [`KMedoidsError::InsufficientData`] when `k == 0` or `k > n`. No
    /// sampling happens before validation passes, and a failed fit leaves
    /// every output at its prior value.
    pub fn fit(&mut self, rows: &[Vec<f64>], metric: &str) -> Result<()> {
        self.fit_with_k(rows, metric, self.config.n_medoids)
    }

    /// [`KMedoids::fit`] with a per-call medoid count, which also becomes
    /// the configured `n_medoids`.
    pub fn fit_with_k(&mut self, rows: &[Vec<f64>], metric: &str, k: usize) -> Result<()> {
        let metric = Metric::parse(metric)?;
        let dataset = Dataset::from_rows(rows)?;
        let n = dataset.len();
        if k == 0 || k > n {
            return Err(KMedoidsError::InsufficientData { k, n });
        }

        let cache = if self.config.cache {
            match &self.cache {
                Some(c) if c.matches(dataset.fingerprint(), metric) => Some(Arc::clone(c)),
                _ => Some(Arc::new(DistanceCache::new(dataset.fingerprint(), metric))),
            }
        } else {
            None
        };

        let oracle = DistanceOracle::new(&dataset, metric, cache.clone());
        let mut perm = if self.config.use_fixed_perm {
            PermutationGenerator::fixed(n, self.config.seed)
        } else {
            PermutationGenerator::random(n)
        };
        let selector = match self.config.algorithm {
            Algorithm::BanditPam => Selector::Bandit {
                batch_size: self.config.batch_size,
                confidence: self.config.confidence,
            },
            Algorithm::Naive => Selector::Exact,
        };

        let run_key = format!("k{k}-{}", metric.name());
        let mut fit_log = FitLog::new(self.config.verbosity, &self.config.log_filename, &run_key)?;

        let build_medoids = pam::build::run(&oracle, k, &selector, &mut perm, &mut fit_log)?;
        let mut final_medoids = build_medoids.clone();
        let steps = pam::swap::run(
            &oracle,
            &mut final_medoids,
            self.config.max_iter,
            &selector,
            &mut perm,
            &mut fit_log,
        )?;
        let labels = AssignmentTable::compute(&oracle, &final_medoids)?.nearest;
        fit_log.finish()?;

        self.config.n_medoids = k;
        self.build_medoids = build_medoids;
        self.final_medoids = final_medoids;
        self.labels = labels;
        self.steps = steps;
        self.cache = cache;
        Ok(())
    }
}
