//! kmedo: bandit-accelerated k-medoids clustering.
//!
//! Selects k representative dataset points (medoids) under a configurable
//! dissimilarity metric. The default `BanditPAM` variant treats candidate
//! medoids as bandit arms: it samples reference points in shared batches,
//! tracks a confidence interval per arm, and eliminates arms that are
//! provably worse, producing the same medoid set as exhaustive
//! Partition-Around-Medoids (PAM) with high probability while computing
//! far fewer pairwise distances. The exhaustive `naive` variant shares the
//! same contract and exists to validate the bandit one.
//!
//! # Why medoids
//!
//! Unlike a centroid, a medoid is always an actual data point, so the
//! method works under any pairwise dissimilarity, not just means-friendly
//! geometry. The price is that exact PAM touches O(n²) distances per
//! decision; the bandit estimator is what makes large n practical.
//!
//! # Usage
//!
//! ```rust
//! use kmedo::{KMedoids, KMedoidsConfig};
//!
//! let rows: Vec<Vec<f64>> = (0..60)
//!     .map(|i| {
//!         let c = (i % 3) as f64 * 50.0;
//!         vec![c + (i / 3) as f64 * 0.1, c - (i % 7) as f64 * 0.1]
//!     })
//!     .collect();
//!
//! let mut engine = KMedoids::new(KMedoidsConfig {
//!     n_medoids: 3,
//!     use_fixed_perm: true, // reproducible runs
//!     ..KMedoidsConfig::default()
//! });
//! engine.fit(&rows, "L2")?;
//!
//! assert_eq!(engine.final_medoids().len(), 3);
//! assert_eq!(engine.labels().len(), rows.len());
//! # Ok::<(), kmedo::KMedoidsError>(())
//! ```
//!
//! # Reproducibility
//!
//! With `use_fixed_perm` set, reference points are drawn in a seeded
//! permutation shared by all arms and consumed in order, so repeated fits
//! on identical input are bit-identical regardless of how many worker
//! threads rayon schedules. Without it, each fit draws a fresh random
//! order and results are only statistically consistent.

pub mod cache;
pub mod dataset;
pub mod distance;
pub mod engine;
pub mod error;
pub mod oracle;
pub mod sampling;

mod bandit;
mod logging;
mod pam;

pub use dataset::Dataset;
pub use distance::Metric;
pub use engine::{Algorithm, KMedoids, KMedoidsConfig};
pub use error::{KMedoidsError, Result};
