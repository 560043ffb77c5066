//! SWAP stage: iterative single-swap refinement.
//!
//! Each iteration forms one arm per (medoid slot, non-medoid candidate)
//! pair, selects the arm with the lowest estimated post-swap assignment
//! cost, and applies it only if its exact total strictly improves on the
//! current cost. Stops at the first non-improving winner or after
//! `max_iter` iterations.

use crate::bandit::{exact_totals, Selector};
use crate::error::Result;
use crate::logging::FitLog;
use crate::oracle::DistanceOracle;
use crate::pam::AssignmentTable;
use crate::sampling::PermutationGenerator;

/// Refine `medoids` in place; returns the number of swaps applied.
pub(crate) fn run(
    oracle: &DistanceOracle<'_>,
    medoids: &mut [usize],
    max_iter: usize,
    selector: &Selector,
    perm: &mut PermutationGenerator,
    fit_log: &mut FitLog,
) -> Result<usize> {
    let n = oracle.len();
    let k = medoids.len();
    let mut steps = 0;

    for _iteration in 0..max_iter {
        let table = AssignmentTable::compute(oracle, medoids)?;
        let current_cost = table.total_cost();

        let candidates: Vec<usize> = (0..n).filter(|i| !medoids.contains(i)).collect();
        if candidates.is_empty() {
            break;
        }

        // Arm encoding: slot-major over the candidate list, so the
        // deterministic tie-break (lowest arm index) prefers earlier slots
        // and lower candidate indices.
        let arms: Vec<usize> = (0..k * candidates.len()).collect();
        let cost = |arm: usize, reference: usize| -> Result<f64> {
            let slot = arm / candidates.len();
            let candidate = candidates[arm % candidates.len()];
            let d = oracle.distance(candidate, reference)?;
            Ok(if table.nearest[reference] == slot {
                d.min(table.second_dist[reference])
            } else {
                d.min(table.nearest_dist[reference])
            })
        };

        let winner = selector.select_min(&arms, n, perm, &cost)?;
        // The bandit winner carries only an estimate; the improvement test
        // runs on the exact total so both variants stop identically.
        let winner_cost = exact_totals(&[winner], n, &cost)?[0];

        if winner_cost < current_cost {
            let slot = winner / candidates.len();
            let candidate = candidates[winner % candidates.len()];
            let outgoing = medoids[slot];
            medoids[slot] = candidate;
            steps += 1;
            fit_log.line(&format!(
                "SWAP step={steps} slot={slot} out={outgoing} in={candidate} cost={winner_cost}"
            ))?;
        } else {
            break;
        }
    }

    Ok(steps)
}
