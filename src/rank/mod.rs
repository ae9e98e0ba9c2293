// src/rank/mod.rs
pub mod matrix;
pub mod power;

pub use matrix::{MatrixParams, StochasticMatrix};
pub use power::PowerIteration;

use crate::config::RankingConfig;
use crate::error::Result;
use crate::graph::{VertexIndex, WeightedGraph};
use crate::oracle::{BiasOracle, SimilarityOracle};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One candidate meaning of a mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub mention: String,
    pub meaning: String,
}

/// Orchestrates matrix construction and the stationary-distribution solve.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    #[must_use]
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Ranks arbitrary items. The result is aligned 1:1 with `items`.
    ///
    /// # Errors
    /// Returns `NonConvergence` if the solver exhausts its iteration cap.
    pub fn rank<I, B, S, F>(
        &self,
        items: &[I],
        bias: &B,
        sim: &S,
        pair_filter: F,
        damping: f64,
    ) -> Result<Vec<f64>>
    where
        I: Sync,
        B: BiasOracle<I> + ?Sized,
        S: SimilarityOracle<I> + ?Sized,
        F: Fn(usize, usize) -> bool + Sync,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let params = MatrixParams {
            damping,
            sim_threshold: self.config.sim_threshold,
            symmetric: self.config.symmetric,
            make_positive: self.config.make_positive,
        };
        let m = matrix::build(items, bias, sim, pair_filter, &params);
        let scores = PowerIteration::new(self.config.stopping_threshold)
            .with_max_iterations(self.config.max_iterations)
            .run(&m)?;
        Ok(if self.config.rebase {
            rebase(&scores)
        } else {
            scores
        })
    }

    /// Ranks candidate meanings. Candidates of the same mention compete, so
    /// their mutual similarity is never consulted.
    ///
    /// # Errors
    /// Returns `NonConvergence` if the solver exhausts its iteration cap.
    pub fn rank_meanings<B, S>(
        &self,
        candidates: &[Candidate],
        bias: &B,
        sim: &S,
    ) -> Result<Vec<f64>>
    where
        B: BiasOracle<str> + ?Sized,
        S: SimilarityOracle<str> + ?Sized,
    {
        let weight = |c: &Candidate| bias.weight(&c.meaning);
        let similarity = |a: &Candidate, b: &Candidate| sim.similarity(&a.meaning, &b.meaning);
        let filter = |i: usize, j: usize| candidates[i].mention != candidates[j].mention;
        self.rank(
            candidates,
            &weight,
            &similarity,
            filter,
            self.config.meaning_damping,
        )
    }

    /// Ranks graph vertices using their `bias` as reset distribution and the
    /// similarity of their meanings as transitions. Returns a new weight vector
    /// indexed by `VertexIndex`; the graph is left untouched.
    ///
    /// # Errors
    /// Returns `NonConvergence` if the solver exhausts its iteration cap.
    pub fn rank_vertices<S>(&self, graph: &WeightedGraph, sim: &S) -> Result<Vec<f64>>
    where
        S: SimilarityOracle<str> + ?Sized,
    {
        let items: Vec<VertexIndex> = (0..graph.vertex_count()).collect();
        let weight = |v: &VertexIndex| graph.vertex(*v).bias;
        let similarity = |a: &VertexIndex, b: &VertexIndex| {
            sim.similarity(&graph.vertex(*a).meaning, &graph.vertex(*b).meaning)
        };
        self.rank(
            &items,
            &weight,
            &similarity,
            |i, j| i != j,
            self.config.vertex_damping,
        )
    }
}

/// Min-max normalization to `[0, 1]`. A constant vector maps to all ones.
#[must_use]
pub fn rebase(scores: &[f64]) -> Vec<f64> {
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range > 0.0 {
        scores.iter().map(|s| (s - min) / range).collect()
    } else {
        vec![1.0; scores.len()]
    }
}

/// Items paired with their scores, best first. Ties keep input order.
#[must_use]
pub fn ranked<'a, T>(items: &'a [T], scores: &[f64]) -> Vec<(&'a T, f64)> {
    let mut pairs: Vec<(&T, f64)> = items.iter().zip(scores.iter().copied()).collect();
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    pairs
}
