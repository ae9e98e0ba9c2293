// src/rank/matrix.rs
//! Biased stochastic matrix construction.
//!
//! Row `u` of the result is the transition distribution out of item `u`: with
//! probability `d` the walk resets to the bias distribution, otherwise it follows
//! the (row-normalized) similarity of `u` to every other item. Cells are
//! evaluated in parallel; each cell is written by exactly one task.

use crate::error::{PlanError, Result};
use crate::oracle::{BiasOracle, SimilarityOracle};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Pseudocount divisor used by the positivity fix-up.
const PSEUDOCOUNT_DIVISOR: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixParams {
    /// Reset probability `d` in `[0, 1]`.
    pub damping: f64,
    /// Similarities below this are zeroed.
    pub sim_threshold: f64,
    /// Compute each unordered pair once and mirror it.
    pub symmetric: bool,
    /// Replace zero cells with a small pseudocount so the chain is irreducible.
    pub make_positive: bool,
}

impl Default for MatrixParams {
    fn default() -> Self {
        Self {
            damping: 0.5,
            sim_threshold: 0.0,
            symmetric: true,
            make_positive: true,
        }
    }
}

/// Dense square row-stochastic matrix, row-major. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticMatrix {
    n: usize,
    data: Vec<f64>,
}

impl StochasticMatrix {
    /// Wraps externally supplied rows after checking every invariant.
    ///
    /// # Errors
    /// Returns `MalformedMatrix` for non-square input, negative or non-finite
    /// entries, or rows that do not sum to 1.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(PlanError::MalformedMatrix(format!(
                "row {i} has {} columns, expected {n}",
                row.len()
            )));
        }
        let matrix = Self {
            n,
            data: rows.into_iter().flatten().collect(),
        };
        matrix.check()?;
        Ok(matrix)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            n: 0,
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Allowed deviation of a row sum from 1: `2 * machine_epsilon * n`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tolerance(n: usize) -> f64 {
        2.0 * f64::EPSILON * n as f64
    }

    /// Verifies non-negativity and row sums.
    ///
    /// # Errors
    /// Returns `MalformedMatrix` describing the first violation.
    pub fn check(&self) -> Result<()> {
        let tol = Self::tolerance(self.n);
        for i in 0..self.n {
            let row = self.row(i);
            if let Some(j) = row.iter().position(|x| !x.is_finite() || *x < 0.0) {
                return Err(PlanError::MalformedMatrix(format!(
                    "cell ({i}, {j}) = {}",
                    row[j]
                )));
            }
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > tol {
                return Err(PlanError::MalformedMatrix(format!(
                    "row {i} sums to {sum}"
                )));
            }
        }
        Ok(())
    }

    /// Row vector times matrix: `out[j] = sum_i v[i] * M[i][j]`.
    #[must_use]
    pub fn left_multiply(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.n);
        let n = self.n;
        (0..n)
            .into_par_iter()
            .map(|j| (0..n).map(|i| v[i] * self.data[i * n + j]).sum())
            .collect()
    }
}

/// Builds the biased stochastic matrix for `items`.
///
/// `pair_filter(i, j)` decides whether the similarity of the pair is consulted
/// at all; rejected pairs contribute 0. The cell for the transition `i -> j`
/// reads `sim(items[j], items[i])`. Undefined similarities count as 0 and
/// negative biases are clamped to 0; both are logged, never fatal.
#[must_use]
pub fn build<I, B, S, F>(
    items: &[I],
    bias: &B,
    sim: &S,
    pair_filter: F,
    params: &MatrixParams,
) -> StochasticMatrix
where
    I: Sync,
    B: BiasOracle<I> + ?Sized,
    S: SimilarityOracle<I> + ?Sized,
    F: Fn(usize, usize) -> bool + Sync,
{
    let n = items.len();
    if n == 0 {
        return StochasticMatrix::empty();
    }

    let reset = bias_distribution(items, bias);
    let similarity = similarity_rows(items, sim, &pair_filter, params);
    let d = params.damping;

    let isolated = similarity
        .iter()
        .filter(|x| x.iter().all(|v| *v == 0.0))
        .count();
    if isolated > 0 {
        warn!(
            isolated,
            items = n,
            "similarity rows with no mass; items are disconnected or have undefined similarity"
        );
    }

    let rows: Vec<Vec<f64>> = similarity
        .into_par_iter()
        .map(|x| {
            let x_sum: f64 = x.iter().sum();
            reset
                .iter()
                .zip(&x)
                .map(|(l, xv)| {
                    let walk = if x_sum > 0.0 { xv / x_sum } else { 0.0 };
                    d * l + (1.0 - d) * walk
                })
                .collect()
        })
        .collect();

    let data: Vec<f64> = rows
        .into_par_iter()
        .flat_map_iter(|mut row| {
            if params.make_positive {
                make_positive(&mut row);
            }
            normalize_row(&mut row);
            row
        })
        .collect();

    let matrix = StochasticMatrix { n, data };
    debug_assert!(matrix.check().is_ok(), "built matrix violates stochasticity");
    debug!(items = n, damping = d, "built stochastic matrix");
    matrix
}

/// Clamped, L1-normalized bias. Uniform when no item has positive bias.
#[allow(clippy::cast_precision_loss)]
fn bias_distribution<I, B>(items: &[I], bias: &B) -> Vec<f64>
where
    I: Sync,
    B: BiasOracle<I> + ?Sized,
{
    let raw: Vec<f64> = items.par_iter().map(|item| bias.weight(item)).collect();
    let clamped = raw.iter().filter(|b| !(b.is_finite() && **b >= 0.0)).count();
    if clamped > 0 {
        warn!(clamped, "negative or undefined bias clamped to zero");
    }
    let mut reset: Vec<f64> = raw
        .into_iter()
        .map(|b| if b >= 0.0 && b.is_finite() { b } else { 0.0 })
        .collect();
    let total: f64 = reset.iter().sum();
    if total > 0.0 {
        reset.iter_mut().for_each(|b| *b /= total);
    } else {
        warn!("all biases are zero, falling back to a uniform reset distribution");
        let uniform = 1.0 / reset.len() as f64;
        reset.iter_mut().for_each(|b| *b = uniform);
    }
    reset
}

/// Raw similarity matrix `X`, thresholded and clamped at zero.
fn similarity_rows<I, S, F>(
    items: &[I],
    sim: &S,
    pair_filter: &F,
    params: &MatrixParams,
) -> Vec<Vec<f64>>
where
    I: Sync,
    S: SimilarityOracle<I> + ?Sized,
    F: Fn(usize, usize) -> bool + Sync,
{
    let n = items.len();
    let cell = |i: usize, j: usize| -> (f64, bool) {
        if !pair_filter(i, j) {
            return (0.0, false);
        }
        match sim.similarity(&items[j], &items[i]) {
            None => (0.0, true),
            Some(s) if s.is_finite() && s >= params.sim_threshold => (s.max(0.0), false),
            Some(_) => (0.0, false),
        }
    };

    let (rows, undefined): (Vec<Vec<f64>>, usize) = if params.symmetric {
        let upper: Vec<Vec<(f64, bool)>> = (0..n)
            .into_par_iter()
            .map(|i| (i..n).map(|j| cell(i, j)).collect())
            .collect();
        let mut rows = vec![vec![0.0; n]; n];
        let mut undefined = 0;
        for (i, cells) in upper.iter().enumerate() {
            for (k, &(value, missing)) in cells.iter().enumerate() {
                let j = i + k;
                rows[i][j] = value;
                rows[j][i] = value;
                undefined += usize::from(missing);
            }
        }
        (rows, undefined)
    } else {
        let cells: Vec<Vec<(f64, bool)>> = (0..n)
            .into_par_iter()
            .map(|i| (0..n).map(|j| cell(i, j)).collect())
            .collect();
        let undefined = cells.iter().flatten().filter(|(_, m)| *m).count();
        let rows = cells
            .into_iter()
            .map(|r| r.into_iter().map(|(v, _)| v).collect())
            .collect();
        (rows, undefined)
    };

    if undefined > 0 {
        warn!(undefined, "similarity undefined for some pairs, defaulting to 0");
    }
    rows
}

#[allow(clippy::cast_precision_loss)]
fn make_positive(row: &mut [f64]) {
    let avg = row.iter().sum::<f64>() / row.len() as f64;
    let alpha = if avg > 0.0 {
        avg / PSEUDOCOUNT_DIVISOR
    } else {
        1.0 / PSEUDOCOUNT_DIVISOR
    };
    for x in row.iter_mut().filter(|x| **x == 0.0) {
        *x = alpha;
    }
}

#[allow(clippy::cast_precision_loss)]
fn normalize_row(row: &mut [f64]) {
    let sum: f64 = row.iter().sum();
    if sum > 0.0 {
        row.iter_mut().for_each(|x| *x /= sum);
    } else {
        let uniform = 1.0 / row.len() as f64;
        row.iter_mut().for_each(|x| *x = uniform);
    }
}
