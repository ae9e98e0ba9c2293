// src/rank/power.rs
//! Stationary distribution of a stochastic matrix by power iteration.

use super::matrix::StochasticMatrix;
use crate::error::{PlanError, Result};
use tracing::{debug, info};

pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;
const PROGRESS_INTERVAL: usize = 1_000;

/// Power iteration with a size-scaled stopping rule.
///
/// Iteration stops once no component moves by `stopping_threshold / n` or more.
/// Fully deterministic for a fixed matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerIteration {
    pub stopping_threshold: f64,
    pub max_iterations: usize,
}

impl PowerIteration {
    #[must_use]
    pub fn new(stopping_threshold: f64) -> Self {
        Self {
            stopping_threshold,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns `pi` with `pi * M = pi` and `sum(pi) = 1`.
    ///
    /// # Errors
    /// Returns `NonConvergence` once `max_iterations` is exhausted.
    #[allow(clippy::cast_precision_loss)]
    pub fn run(&self, matrix: &StochasticMatrix) -> Result<Vec<f64>> {
        let n = matrix.dim();
        if n == 0 {
            return Ok(Vec::new());
        }

        let limit = self.stopping_threshold / n as f64;
        let mut ranks = vec![1.0 / n as f64; n];
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let next = iterate_once(matrix, &ranks);
            delta = max_abs_diff(&next, &ranks);
            ranks = next;

            if delta < limit {
                debug!(iteration, delta, "power iteration converged");
                return Ok(ranks);
            }
            if iteration % PROGRESS_INTERVAL == 0 {
                info!(iteration, delta, limit, "power iteration still running");
            }
        }

        Err(PlanError::NonConvergence {
            iterations: self.max_iterations,
            delta,
        })
    }
}

fn iterate_once(matrix: &StochasticMatrix, ranks: &[f64]) -> Vec<f64> {
    let mut next = matrix.left_multiply(ranks);
    normalize(&mut next);
    next
}

fn normalize(ranks: &mut [f64]) {
    let total: f64 = ranks.iter().sum();
    if total > 0.0 {
        for rank in ranks.iter_mut() {
            *rank /= total;
        }
    }
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matrix_yields_empty_ranking() -> Result<()> {
        let ranks = PowerIteration::new(1e-6).run(&StochasticMatrix::empty())?;
        assert!(ranks.is_empty());
        Ok(())
    }

    #[test]
    fn two_state_chain_converges_to_known_distribution() -> Result<()> {
        // Stationary distribution of [[0.75, 0.25], [0.5, 0.5]] is [2/3, 1/3].
        let m = StochasticMatrix::from_rows(vec![vec![0.75, 0.25], vec![0.5, 0.5]])?;
        let ranks = PowerIteration::new(1e-12).run(&m)?;
        assert!((ranks[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!((ranks[1] - 1.0 / 3.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn uniform_is_stationary_for_a_permutation() -> Result<()> {
        let m = StochasticMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ])?;
        let ranks = PowerIteration::new(1e-6).with_max_iterations(1).run(&m)?;
        assert!(ranks.iter().all(|r| (r - 1.0 / 3.0).abs() < 1e-12));
        Ok(())
    }

    #[test]
    fn iteration_cap_raises_non_convergence() -> Result<()> {
        let m = StochasticMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.5, 0.5]])?;
        let err = PowerIteration::new(1e-15).with_max_iterations(2).run(&m);
        assert!(matches!(
            err,
            Err(PlanError::NonConvergence { iterations: 2, .. })
        ));
        Ok(())
    }
}
