// src/lib.rs
//! Content selection over semantic graphs: biased PageRank ranking, greedy
//! subgraph extraction and tree-edit-distance redundancy filtering.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod extract;
pub mod graph;
pub mod oracle;
pub mod pipeline;
pub mod rank;
pub mod redundancy;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use graph::{Subgraph, Vertex, WeightedGraph};
pub use oracle::{BiasOracle, SimilarityOracle, SimilarityTable};
pub use pipeline::{PlanOutput, Planner};
