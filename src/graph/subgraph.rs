// src/graph/subgraph.rs
//! Induced subgraphs borrowed from a base graph.

use super::{EdgeIndex, EdgeSpec, VertexIndex, WeightedGraph};
use serde::Serialize;
use std::collections::BTreeSet;

/// An induced subgraph plus the value it scored when it was extracted.
///
/// Holds only indices into the base graph, which it borrows.
#[derive(Debug, Clone)]
pub struct Subgraph<'g> {
    graph: &'g WeightedGraph,
    vertices: BTreeSet<VertexIndex>,
    edges: Vec<EdgeIndex>,
    root: VertexIndex,
    source: Option<String>,
    value: f64,
}

impl<'g> Subgraph<'g> {
    /// Induces the subgraph on `vertices`. Edges are fully determined by the set.
    #[must_use]
    pub fn new(
        graph: &'g WeightedGraph,
        vertices: BTreeSet<VertexIndex>,
        root: VertexIndex,
        source: Option<String>,
        value: f64,
    ) -> Self {
        let edges = graph.induced_edges(&vertices);
        Self {
            graph,
            vertices,
            edges,
            root,
            source,
            value,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    #[must_use]
    pub fn vertices(&self) -> &BTreeSet<VertexIndex> {
        &self.vertices
    }

    #[must_use]
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    #[must_use]
    pub fn root(&self) -> VertexIndex {
        self.root
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn contains(&self, v: VertexIndex) -> bool {
        self.vertices.contains(&v)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.graph.is_connected(&self.vertices)
    }

    /// Id-based view for output.
    #[must_use]
    pub fn report(&self) -> SubgraphReport {
        let g = self.graph;
        SubgraphReport {
            root: g.vertex(self.root).id.clone(),
            source: self.source.clone(),
            value: self.value,
            vertices: self
                .vertices
                .iter()
                .map(|&v| VertexReport {
                    id: g.vertex(v).id.clone(),
                    meaning: g.vertex(v).meaning.clone(),
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|&e| {
                    let edge = g.edge(e);
                    EdgeSpec {
                        source: g.vertex(edge.source).id.clone(),
                        target: g.vertex(edge.target).id.clone(),
                        label: edge.label.clone(),
                    }
                })
                .collect(),
        }
    }
}

impl PartialEq for Subgraph<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph)
            && self.vertices == other.vertices
            && self.root == other.root
            && self.source == other.source
            && self.value.to_bits() == other.value.to_bits()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VertexReport {
    pub id: String,
    pub meaning: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubgraphReport {
    pub root: String,
    pub source: Option<String>,
    pub value: f64,
    pub vertices: Vec<VertexReport>,
    pub edges: Vec<EdgeSpec>,
}
