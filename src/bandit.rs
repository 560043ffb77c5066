//! Bandit arm selection.
//!
//! Both BUILD and SWAP reduce to the same question: among a set of
//! candidate arms, which one has the lowest total cost over all reference
//! points? The bandit selector answers it by sampling reference points in
//! shared batches, keeping a running mean and confidence radius per arm,
//! and eliminating arms that are provably worse than the current best.
//! Rounds are a synchronization barrier: every active arm finishes its
//! batch before any elimination runs.
//!
//! The exact selector evaluates every arm against every reference point
//! with no sampling. It implements the `naive` algorithm variant and the
//! fallback used when the sample permutation is exhausted with more than
//! one arm still active.

use rayon::prelude::*;

use crate::error::{KMedoidsError, Result};
use crate::sampling::PermutationGenerator;

/// Per-(arm, reference) cost contribution, evaluated by worker threads.
pub(crate) trait ArmCost: Sync {
    fn cost(&self, arm: usize, reference: usize) -> Result<f64>;
}

impl<F> ArmCost for F
where
    F: Fn(usize, usize) -> Result<f64> + Sync,
{
    #[inline]
    fn cost(&self, arm: usize, reference: usize) -> Result<f64> {
        self(arm, reference)
    }
}

/// Arm-selection strategy, chosen at configuration time.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Selector {
    /// Sample-and-eliminate with confidence bounds.
    Bandit {
        /// Reference points drawn per round.
        batch_size: usize,
        /// Error budget δ for the elimination bound.
        confidence: f64,
    },
    /// Exhaustive evaluation of every arm (the `naive` variant).
    Exact,
}

/// Running statistics for one candidate arm.
#[derive(Debug, Clone)]
struct ArmState {
    id: usize,
    sum: f64,
    sum_sq: f64,
    n: usize,
}

impl ArmState {
    fn new(id: usize) -> Self {
        Self {
            id,
            sum: 0.0,
            sum_sq: 0.0,
            n: 0,
        }
    }

    #[inline]
    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }

    /// Sample variance of the per-reference costs.
    #[inline]
    fn variance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let n = self.n as f64;
        ((self.sum_sq - self.sum * self.sum / n) / (n - 1.0)).max(0.0)
    }

    /// Empirical-Bernstein confidence radius at error budget `delta`.
    ///
    /// `range` is the spread of per-reference costs observed so far across
    /// all arms. The range term keeps the interval open when a batch
    /// happens to have zero sample variance: an arm whose costs are
    /// constant within the sampled batch may still differ elsewhere, so a
    /// pure variance bound would eliminate arms that are not provably
    /// worse.
    #[inline]
    fn radius(&self, delta: f64, range: f64) -> f64 {
        let n = self.n as f64;
        let log_term = (1.0 / delta).ln();
        (2.0 * self.variance() * log_term / n).sqrt() + 3.0 * range * log_term / n
    }
}

impl Selector {
    /// Select the arm with the lowest total cost over `n_refs` reference
    /// points. Ties break deterministically toward the lowest arm index.
    pub(crate) fn select_min(
        &self,
        arms: &[usize],
        n_refs: usize,
        perm: &mut PermutationGenerator,
        cost: &impl ArmCost,
    ) -> Result<usize> {
        debug_assert!(!arms.is_empty());
        if arms.len() == 1 {
            return Ok(arms[0]);
        }
        match *self {
            Selector::Exact => select_exact(arms, n_refs, cost),
            Selector::Bandit {
                batch_size,
                confidence,
            } => select_bandit(arms, n_refs, perm, cost, batch_size.max(1), confidence),
        }
    }
}

fn select_bandit(
    arms: &[usize],
    n_refs: usize,
    perm: &mut PermutationGenerator,
    cost: &impl ArmCost,
    batch_size: usize,
    confidence: f64,
) -> Result<usize> {
    // Union bound over the initial arm count.
    let delta = (confidence / arms.len() as f64).max(f64::MIN_POSITIVE);

    let mut states: Vec<ArmState> = arms.iter().map(|&id| ArmState::new(id)).collect();
    let mut active: Vec<usize> = (0..states.len()).collect();
    let mut cost_min = f64::INFINITY;
    let mut cost_max = f64::NEG_INFINITY;

    perm.reset();
    while active.len() > 1 {
        let batch = perm.next_batch(batch_size).to_vec();
        if batch.is_empty() {
            // Samples exhausted with several survivors: settle them exactly.
            let survivors: Vec<usize> = active.iter().map(|&pos| states[pos].id).collect();
            return select_exact(&survivors, n_refs, cost);
        }

        let updates = sample_round(&states, &active, &batch, cost)?;
        for (pos, d_sum, d_sum_sq, b_min, b_max) in updates {
            let s = &mut states[pos];
            s.sum += d_sum;
            s.sum_sq += d_sum_sq;
            s.n += batch.len();
            cost_min = cost_min.min(b_min);
            cost_max = cost_max.max(b_max);
        }
        let range = (cost_max - cost_min).max(0.0);

        let min_ucb = active
            .iter()
            .map(|&pos| {
                let s = &states[pos];
                s.mean() + s.radius(delta, range)
            })
            .fold(f64::INFINITY, f64::min);

        // An arm whose lower bound clears the best upper bound is provably
        // worse than some surviving arm.
        active.retain(|&pos| {
            let s = &states[pos];
            s.mean() - s.radius(delta, range) <= min_ucb
        });
    }

    match active.first() {
        Some(&pos) => Ok(states[pos].id),
        // All arms eliminated in one round can only happen on NaN costs;
        // treat it as a worker fault rather than picking arbitrarily.
        None => Err(KMedoidsError::WorkerFailure(
            "all arms eliminated; cost function produced non-finite values".to_string(),
        )),
    }
}

/// One parallel sampling round, retried once before surfacing a fault.
///
/// Returns per-arm `(position, sum, sum of squares, batch min, batch max)`;
/// the extrema feed the observed cost range in the confidence radius.
fn sample_round(
    states: &[ArmState],
    active: &[usize],
    batch: &[usize],
    cost: &impl ArmCost,
) -> Result<Vec<(usize, f64, f64, f64, f64)>> {
    let run = || -> Result<Vec<(usize, f64, f64, f64, f64)>> {
        active
            .par_iter()
            .map(|&pos| {
                let id = states[pos].id;
                let mut sum = 0.0;
                let mut sum_sq = 0.0;
                let mut b_min = f64::INFINITY;
                let mut b_max = f64::NEG_INFINITY;
                // Sequential within the arm: per-arm sums stay bit-stable
                // no matter how arms are scheduled across threads.
                for &r in batch {
                    let c = cost.cost(id, r)?;
                    sum += c;
                    sum_sq += c * c;
                    b_min = b_min.min(c);
                    b_max = b_max.max(c);
                }
                Ok((pos, sum, sum_sq, b_min, b_max))
            })
            .collect()
    };

    run().or_else(|_| {
        run().map_err(|e| KMedoidsError::WorkerFailure(e.to_string()))
    })
}

/// Evaluate every arm exactly against every reference point and return the
/// minimizer, breaking ties by lowest total then lowest position.
pub(crate) fn select_exact(arms: &[usize], n_refs: usize, cost: &impl ArmCost) -> Result<usize> {
    let totals = exact_totals(arms, n_refs, cost)?;
    let mut best = 0;
    for (pos, &t) in totals.iter().enumerate() {
        if t < totals[best] {
            best = pos;
        }
    }
    Ok(arms[best])
}

/// Exact total cost of each arm over all `n_refs` reference points.
pub(crate) fn exact_totals(
    arms: &[usize],
    n_refs: usize,
    cost: &impl ArmCost,
) -> Result<Vec<f64>> {
    let run = || -> Result<Vec<f64>> {
        arms.par_iter()
            .map(|&id| {
                let mut total = 0.0;
                for r in 0..n_refs {
                    total += cost.cost(id, r)?;
                }
                Ok(total)
            })
            .collect()
    };

    run().or_else(|_| {
        run().map_err(|e| KMedoidsError::WorkerFailure(e.to_string()))
    })
}
