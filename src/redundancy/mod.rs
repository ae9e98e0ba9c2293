// src/redundancy/mod.rs
//! Filtering near-duplicate subgraphs.
//!
//! Two subgraphs are compared as canonical ordered trees. The relabel cost
//! between nodes blends role equality with meaning similarity, and the edit
//! distance is normalised by the combined tree size.

pub mod edit_distance;
pub mod tree;

pub use edit_distance::tree_edit_distance;
pub use tree::{CanonicalTree, TreeNode};

use crate::config::RedundancyConfig;
use crate::graph::Subgraph;
use crate::oracle::SimilarityOracle;
use rayon::prelude::*;
use tracing::debug;

/// Similarity in `[0, 1]` between subgraphs derived from a tree edit distance.
pub struct TreeEditSimilarity<'o, S: ?Sized> {
    sim: &'o S,
    role_weight: f64,
}

impl<'o, S> TreeEditSimilarity<'o, S>
where
    S: SimilarityOracle<str> + ?Sized,
{
    /// `role_weight` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(sim: &'o S, role_weight: f64) -> Self {
        Self {
            sim,
            role_weight: role_weight.clamp(0.0, 1.0),
        }
    }

    /// Meaning similarity clamped to `[0, 1]`; unknown pairs count as unrelated.
    fn meaning_similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match self.sim.similarity(lo, hi) {
            Some(s) if s.is_finite() => s.clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// `1 - d * [roles equal] - (1 - d) * sim(meanings)`, never negative.
    #[must_use]
    pub fn replace_cost(&self, x: &TreeNode<'_>, y: &TreeNode<'_>) -> f64 {
        let same_role = x.role == y.role;
        if same_role && x.meaning == y.meaning {
            return 0.0;
        }
        let role_term = if same_role { self.role_weight } else { 0.0 };
        let meaning_term = (1.0 - self.role_weight) * self.meaning_similarity(x.meaning, y.meaning);
        (1.0 - role_term - meaning_term).max(0.0)
    }

    /// Edit distance between two trees, independent of argument order.
    #[must_use]
    pub fn tree_distance(&self, a: &CanonicalTree<'_>, b: &CanonicalTree<'_>) -> f64 {
        let (first, second) = if a.signature() <= b.signature() { (a, b) } else { (b, a) };
        tree_edit_distance(first, second, |x, y| self.replace_cost(x, y))
    }

    /// `1 - min(1, d / (|a| + |b|))`; two empty trees are identical.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tree_similarity(&self, a: &CanonicalTree<'_>, b: &CanonicalTree<'_>) -> f64 {
        let size = a.len() + b.len();
        if size == 0 {
            return 1.0;
        }
        let normalised = self.tree_distance(a, b) / size as f64;
        1.0 - normalised.min(1.0)
    }

    #[must_use]
    pub fn similarity(&self, a: &Subgraph<'_>, b: &Subgraph<'_>) -> f64 {
        self.tree_similarity(&CanonicalTree::from_subgraph(a), &CanonicalTree::from_subgraph(b))
    }
}

/// Keeps the best subgraphs that are not too similar to one already kept.
pub struct RedundancyRemover<'o, S: ?Sized> {
    similarity: TreeEditSimilarity<'o, S>,
    threshold: f64,
}

impl<'o, S> RedundancyRemover<'o, S>
where
    S: SimilarityOracle<str> + ?Sized,
{
    #[must_use]
    pub fn new(sim: &'o S, threshold: f64, role_weight: f64) -> Self {
        Self {
            similarity: TreeEditSimilarity::new(sim, role_weight),
            threshold,
        }
    }

    #[must_use]
    pub fn from_config(sim: &'o S, config: &RedundancyConfig) -> Self {
        Self::new(sim, config.threshold, config.role_weight)
    }

    #[must_use]
    pub fn similarity(&self) -> &TreeEditSimilarity<'o, S> {
        &self.similarity
    }

    /// Walks `subgraphs` by descending value (ties keep input order) and keeps
    /// each one whose similarity to every kept subgraph is at most the
    /// threshold, until `keep_count` are kept.
    #[must_use]
    pub fn filter<'g>(
        &self,
        mut subgraphs: Vec<Subgraph<'g>>,
        keep_count: usize,
    ) -> Vec<Subgraph<'g>> {
        subgraphs.sort_by(|a, b| b.value().total_cmp(&a.value()));

        let mut kept: Vec<(Subgraph<'g>, CanonicalTree<'g>)> = Vec::new();
        for candidate in subgraphs {
            if kept.len() >= keep_count {
                break;
            }
            let tree = CanonicalTree::from_subgraph(&candidate);
            let redundant = kept
                .par_iter()
                .any(|(_, other)| self.similarity.tree_similarity(other, &tree) > self.threshold);
            if redundant {
                debug!(
                    root = %candidate.graph().vertex(candidate.root()).id,
                    vertices = candidate.len(),
                    "dropping redundant subgraph"
                );
            } else {
                kept.push((candidate, tree));
            }
        }
        kept.into_iter().map(|(sub, _)| sub).collect()
    }
}
