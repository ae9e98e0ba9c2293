// src/extract/mod.rs
//! Content pattern extraction: greedy, randomly restarted hill climbing over
//! connected vertex sets of the ranked graph.
//!
//! A state's value is `lambda * sum(weights) - cost * |V| + cost * |V_total|`,
//! where `cost` is the mean vertex weight. The last term only shifts the value
//! so it is never negative.

pub mod explorer;
pub mod policy;
pub mod state;

pub use explorer::Explorer;
pub use policy::SelectionPolicy;
pub use state::State;

use crate::config::ExtractionConfig;
use crate::graph::{Subgraph, VertexIndex, WeightedGraph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Extractor {
    explorer: Explorer,
    policy: SelectionPolicy,
    lambda: f64,
    max_extractions: usize,
    seed: u64,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl Extractor {
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            explorer: Explorer::new(config.explorer, config.neighbours),
            policy: SelectionPolicy::from_config(config.selection, config.temperature),
            lambda: config.lambda,
            max_extractions: config.max_extractions,
            seed: config.seed,
        }
    }

    #[must_use]
    pub fn with_explorer(mut self, explorer: Explorer) -> Self {
        self.explorer = explorer;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_max_extractions(mut self, max_extractions: usize) -> Self {
        self.max_extractions = max_extractions;
        self
    }

    #[must_use]
    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// Value of a vertex set under the current weights.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(
        &self,
        graph: &WeightedGraph,
        vertices: &BTreeSet<VertexIndex>,
        weights: &[f64],
        cost: f64,
    ) -> f64 {
        let reward: f64 = vertices.iter().map(|&v| weights[v]).sum();
        let size = vertices.len() as f64;
        let total = graph.vertex_count() as f64;
        self.lambda * reward - cost * size + cost * total
    }

    /// One extraction: pick a start state, then climb.
    ///
    /// Returns `None` when the graph offers no start state.
    pub fn extract_one<'g, R: Rng + ?Sized>(
        &self,
        graph: &'g WeightedGraph,
        weights: &[f64],
        cost: f64,
        rng: &mut R,
    ) -> Option<Subgraph<'g>> {
        let mut starts = self.explorer.start_states(graph);
        let scores: Vec<f64> = starts
            .iter()
            .map(|s| self.value(graph, s.vertices(), weights, cost))
            .collect();
        let chosen = self.policy.select(&scores, rng)?;
        let start = starts.swap_remove(chosen);
        Some(self.grow(graph, weights, cost, start, rng))
    }

    /// Hill climbing from `start`. A selected move is taken only if it strictly
    /// improves the value; the first non-improving step ends the climb.
    pub fn grow<'g, R: Rng + ?Sized>(
        &self,
        graph: &'g WeightedGraph,
        weights: &[f64],
        cost: f64,
        start: State,
        rng: &mut R,
    ) -> Subgraph<'g> {
        let mut current = start;
        let mut current_value = self.value(graph, current.vertices(), weights, cost);

        loop {
            let mut candidates = self.explorer.next_states(graph, &current);
            let scores: Vec<f64> = candidates
                .iter()
                .map(|s| self.value(graph, s.vertices(), weights, cost))
                .collect();
            let Some(chosen) = self.policy.select(&scores, rng) else {
                break;
            };
            if scores[chosen] <= current_value {
                break;
            }
            current_value = scores[chosen];
            current = candidates.swap_remove(chosen);
        }

        current.into_subgraph(graph, current_value)
    }

    /// Up to `target_count` valid, pairwise distinct subgraphs.
    ///
    /// Attempts run in parallel rounds; attempt `k` draws from a generator seeded
    /// with `seed + k` and results are merged in attempt order, so the output is
    /// reproducible. Stops at `target_count` or after `max_extractions` attempts.
    /// A deterministic policy yields the same subgraph every time, so it gets a
    /// single attempt.
    #[must_use]
    pub fn extract_many<'g>(
        &self,
        graph: &'g WeightedGraph,
        weights: &[f64],
        target_count: usize,
    ) -> Vec<Subgraph<'g>> {
        assert_eq!(
            weights.len(),
            graph.vertex_count(),
            "weight vector must align with the graph's vertices"
        );
        if graph.is_empty() || target_count == 0 {
            return Vec::new();
        }

        let cost = average_cost(weights);
        let max_attempts = if self.policy.is_deterministic() {
            1
        } else {
            self.max_extractions
        };
        let round_size = rayon::current_num_threads().max(1);

        let mut kept: Vec<Subgraph<'g>> = Vec::new();
        let mut seen: HashSet<BTreeSet<VertexIndex>> = HashSet::new();
        let mut attempt = 0;

        while attempt < max_attempts && kept.len() < target_count {
            let round = round_size.min(max_attempts - attempt);
            let results: Vec<Option<Subgraph<'g>>> = (attempt..attempt + round)
                .into_par_iter()
                .map(|k| {
                    let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(k as u64));
                    self.extract_one(graph, weights, cost, &mut rng)
                })
                .collect();

            for (k, result) in (attempt..).zip(results) {
                if kept.len() >= target_count {
                    break;
                }
                match result {
                    None => debug!(attempt = k, "no start state, nothing extracted"),
                    Some(sub) if !is_valid(&sub) => {
                        debug!(
                            attempt = k,
                            vertices = sub.len(),
                            "discarding edgeless or disconnected subgraph"
                        );
                    }
                    Some(sub) if seen.contains(sub.vertices()) => {
                        debug!(attempt = k, "discarding duplicate subgraph");
                    }
                    Some(sub) => {
                        seen.insert(sub.vertices().clone());
                        kept.push(sub);
                    }
                }
            }
            attempt += round;
        }

        info!(kept = kept.len(), attempts = attempt, target_count, "extraction finished");
        kept
    }
}

/// Mean vertex weight; the per-vertex cost of growing a subgraph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_cost(weights: &[f64]) -> f64 {
    if weights.is_empty() {
        0.0
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    }
}

fn is_valid(sub: &Subgraph<'_>) -> bool {
    !sub.edges().is_empty() && sub.is_connected()
}
