// src/cli/handlers.rs
use super::args::InputArgs;
use super::report;
use crate::config::{io, PlannerConfig};
use crate::error::PlanError;
use crate::exit::PlanExit;
use crate::graph::WeightedGraph;
use crate::oracle::SimilarityTable;
use crate::pipeline::{vertex_weights, Planner};
use crate::rank::Ranker;
use anyhow::Result;
use std::fs;
use std::path::Path;

fn read(path: &Path) -> crate::error::Result<String> {
    fs::read_to_string(path).map_err(|source| PlanError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// An explicitly named config must exist; the implicit one may be absent.
///
/// # Errors
/// Returns error if the file is missing, unreadable, malformed or out of range.
pub fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::load(Path::new(io::CONFIG_FILE))?);
    };
    let config = io::parse(&read(path)?)?;
    config.validate()?;
    Ok(config)
}

/// # Errors
/// Returns error if the file is unreadable or does not describe a valid graph.
pub fn load_graph(path: &Path) -> Result<WeightedGraph> {
    let graph = WeightedGraph::from_json(&read(path)?)?;
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// No file means no known pairs; identical meanings still score 1.
///
/// # Errors
/// Returns error if the file is unreadable or malformed.
pub fn load_similarity(path: Option<&Path>) -> Result<SimilarityTable> {
    match path {
        Some(path) => Ok(SimilarityTable::from_json(&read(path)?)?),
        None => Ok(SimilarityTable::new()),
    }
}

/// Handles the rank command.
///
/// # Errors
/// Returns error if inputs cannot be loaded or ranking does not converge.
pub fn handle_rank(input: &InputArgs) -> Result<PlanExit> {
    let config = load_config(input.config.as_deref())?;
    let graph = load_graph(&input.graph)?;
    let sim = load_similarity(input.similarity.as_deref())?;

    let weights = Ranker::new(config.ranking).rank_vertices(&graph, &sim)?;
    let ranking = vertex_weights(&graph, &weights);
    if input.json {
        report::print_json(&ranking)?;
    } else {
        report::print_ranking(&ranking);
    }
    Ok(PlanExit::Success)
}

/// Handles the plan command.
///
/// # Errors
/// Returns error if inputs cannot be loaded or ranking does not converge.
pub fn handle_plan(input: &InputArgs, seed: Option<u64>) -> Result<PlanExit> {
    let mut config = load_config(input.config.as_deref())?;
    if let Some(seed) = seed {
        config.extraction.seed = seed;
    }
    let graph = load_graph(&input.graph)?;
    let sim = load_similarity(input.similarity.as_deref())?;

    let output = Planner::new(config).plan(&graph, &sim)?;
    let plan = output.report(&graph);
    if input.json {
        report::print_json(&plan)?;
    } else {
        report::print_plan(&plan);
    }
    Ok(PlanExit::Success)
}

/// Handles the config command.
///
/// # Errors
/// Returns error if the config cannot be loaded or rendered.
pub fn handle_config(path: Option<&Path>) -> Result<PlanExit> {
    let config = load_config(path)?;
    print!("{}", io::render(&config)?);
    Ok(PlanExit::Success)
}
