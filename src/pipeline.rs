// src/pipeline.rs
//! End-to-end content selection: rank vertices, extract candidate subgraphs,
//! drop redundant ones.

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::extract::Extractor;
use crate::graph::{Subgraph, SubgraphReport, WeightedGraph};
use crate::oracle::SimilarityOracle;
use crate::rank::{ranked, Ranker};
use crate::redundancy::RedundancyRemover;
use serde::Serialize;
use tracing::info;

/// Ranked weights plus the surviving subgraphs, best first.
#[derive(Debug, Clone)]
pub struct PlanOutput<'g> {
    /// One weight per vertex, indexed by `VertexIndex`.
    pub weights: Vec<f64>,
    pub subgraphs: Vec<Subgraph<'g>>,
}

impl PlanOutput<'_> {
    #[must_use]
    pub fn report(&self, graph: &WeightedGraph) -> PlanReport {
        PlanReport {
            weights: vertex_weights(graph, &self.weights),
            subgraphs: self.subgraphs.iter().map(Subgraph::report).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexWeight {
    pub id: String,
    pub meaning: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub weights: Vec<VertexWeight>,
    pub subgraphs: Vec<SubgraphReport>,
}

/// Weights paired with their vertices, best first.
#[must_use]
pub fn vertex_weights(graph: &WeightedGraph, weights: &[f64]) -> Vec<VertexWeight> {
    ranked(graph.vertices(), weights)
        .into_iter()
        .map(|(v, weight)| VertexWeight {
            id: v.id.clone(),
            meaning: v.meaning.clone(),
            weight,
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Runs the full pipeline against `graph`. The graph is only borrowed;
    /// the returned subgraphs point into it.
    ///
    /// # Errors
    /// Returns `NonConvergence` if vertex ranking does not settle.
    pub fn plan<'g, S>(&self, graph: &'g WeightedGraph, sim: &S) -> Result<PlanOutput<'g>>
    where
        S: SimilarityOracle<str> + ?Sized,
    {
        let weights = Ranker::new(self.config.ranking.clone()).rank_vertices(graph, sim)?;

        let extraction = &self.config.extraction;
        let candidates =
            Extractor::new(extraction).extract_many(graph, &weights, extraction.target_count);
        let extracted = candidates.len();

        let redundancy = &self.config.redundancy;
        let subgraphs = RedundancyRemover::from_config(sim, redundancy)
            .filter(candidates, redundancy.keep_count);

        info!(
            vertices = graph.vertex_count(),
            extracted,
            kept = subgraphs.len(),
            "plan finished"
        );
        Ok(PlanOutput { weights, subgraphs })
    }
}
