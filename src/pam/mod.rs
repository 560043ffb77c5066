//! Partition-Around-Medoids stages.
//!
//! BUILD greedily constructs the initial medoid set; SWAP refines it one
//! replacement at a time. Both stages express their candidate evaluation as
//! arms for the selector in [`crate::bandit`], so the bandit-accelerated
//! and naive variants share these drivers.

pub(crate) mod build;
pub(crate) mod swap;

use rayon::prelude::*;

use crate::error::Result;
use crate::oracle::DistanceOracle;

/// Per-point nearest and second-nearest current-medoid distances.
///
/// SWAP's cost recurrence needs both: removing a point's own nearest
/// medoid re-assigns it to the second-nearest unless the incoming
/// candidate is closer.
#[derive(Debug)]
pub(crate) struct AssignmentTable {
    /// Slot of the nearest medoid per point.
    pub nearest: Vec<usize>,
    /// Distance to the nearest medoid per point.
    pub nearest_dist: Vec<f64>,
    /// Distance to the second-nearest medoid per point (infinity for k=1).
    pub second_dist: Vec<f64>,
}

impl AssignmentTable {
    pub(crate) fn compute(oracle: &DistanceOracle<'_>, medoids: &[usize]) -> Result<Self> {
        let n = oracle.len();
        let per_point: Vec<(usize, f64, f64)> = (0..n)
            .into_par_iter()
            .map(|j| {
                let mut best_slot = 0;
                let mut best = f64::INFINITY;
                let mut second = f64::INFINITY;
                for (slot, &m) in medoids.iter().enumerate() {
                    let d = oracle.distance(m, j)?;
                    if d < best {
                        second = best;
                        best = d;
                        best_slot = slot;
                    } else if d < second {
                        second = d;
                    }
                }
                Ok((best_slot, best, second))
            })
            .collect::<Result<_>>()?;

        let mut table = Self {
            nearest: Vec::with_capacity(n),
            nearest_dist: Vec::with_capacity(n),
            second_dist: Vec::with_capacity(n),
        };
        for (slot, best, second) in per_point {
            table.nearest.push(slot);
            table.nearest_dist.push(best);
            table.second_dist.push(second);
        }
        Ok(table)
    }

    /// Total assignment cost under the current medoid set.
    pub(crate) fn total_cost(&self) -> f64 {
        self.nearest_dist.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::distance::Metric;

    #[test]
    fn assignment_table_tracks_nearest_and_second() {
        let ds = Dataset::from_rows(&[
            vec![0.0],
            vec![1.0],
            vec![10.0],
            vec![11.0],
        ])
        .unwrap();
        let oracle = DistanceOracle::new(&ds, Metric::L2, None);
        let table = AssignmentTable::compute(&oracle, &[0, 2]).unwrap();

        assert_eq!(table.nearest, vec![0, 0, 1, 1]);
        assert_eq!(table.nearest_dist, vec![0.0, 1.0, 0.0, 1.0]);
        // Second-nearest is always the other medoid here.
        assert_eq!(table.second_dist, vec![10.0, 9.0, 10.0, 11.0]);
        assert!((table.total_cost() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_medoid_has_infinite_second() {
        let ds = Dataset::from_rows(&[vec![0.0], vec![3.0]]).unwrap();
        let oracle = DistanceOracle::new(&ds, Metric::L1, None);
        let table = AssignmentTable::compute(&oracle, &[1]).unwrap();
        assert!(table.second_dist.iter().all(|d| d.is_infinite()));
    }
}
