// src/graph/mod.rs
//! The semantic graph: an arena of vertices addressed by generated indices.
//!
//! Vertex ids from the input are resolved once into `VertexIndex` values; every
//! later stage works with indices. Weights are not stored here: ranking produces
//! a fresh weight vector aligned with the vertex indices.

pub mod roles;
pub mod subgraph;

pub use subgraph::{Subgraph, SubgraphReport};

use crate::error::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};

pub type VertexIndex = usize;
pub type EdgeIndex = usize;

/// A vertex: one meaning occurrence, tagged with the sources (sentences,
/// documents) it was collected from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
    pub meaning: String,
    #[serde(default)]
    pub sources: BTreeSet<String>,
    /// Prior importance used as the reset distribution when ranking vertices.
    #[serde(default = "default_bias")]
    pub bias: f64,
}

impl Vertex {
    #[must_use]
    pub fn new(id: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meaning: meaning.into(),
            sources: BTreeSet::new(),
            bias: default_bias(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.insert(source.into());
        self
    }

    #[must_use]
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }
}

const fn default_bias() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: VertexIndex,
    pub target: VertexIndex,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// Serialized form of a graph: vertices plus edges referring to vertex ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// Directed multigraph with string ids and string edge labels.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    index: HashMap<String, VertexIndex>,
    outgoing: Vec<Vec<EdgeIndex>>,
    incoming: Vec<Vec<EdgeIndex>>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    ///
    /// # Errors
    /// Returns `DuplicateVertex` if the id is already present.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<VertexIndex> {
        if self.index.contains_key(&vertex.id) {
            return Err(PlanError::DuplicateVertex(vertex.id));
        }
        let idx = self.vertices.len();
        self.index.insert(vertex.id.clone(), idx);
        self.vertices.push(vertex);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(idx)
    }

    /// Adds a labelled edge between two existing vertex ids.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if either endpoint is missing.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) -> Result<EdgeIndex> {
        let s = self.require(source)?;
        let t = self.require(target)?;
        let idx = self.edges.len();
        self.edges.push(Edge {
            source: s,
            target: t,
            label: roles::normalize(label).to_string(),
        });
        self.outgoing[s].push(idx);
        self.incoming[t].push(idx);
        Ok(idx)
    }

    /// Builds a graph from its serialized form.
    ///
    /// # Errors
    /// Returns error on duplicate ids or edges naming unknown vertices.
    pub fn from_spec(spec: GraphSpec) -> Result<Self> {
        let mut graph = Self::new();
        for v in spec.vertices {
            graph.add_vertex(v)?;
        }
        for e in &spec.edges {
            graph.add_edge(&e.source, &e.target, &e.label)?;
        }
        Ok(graph)
    }

    /// Parses a JSON `GraphSpec`.
    ///
    /// # Errors
    /// Returns error on malformed JSON or an inconsistent graph.
    pub fn from_json(content: &str) -> Result<Self> {
        let spec: GraphSpec = serde_json::from_str(content)?;
        Self::from_spec(spec)
    }

    fn require(&self, id: &str) -> Result<VertexIndex> {
        self.index_of(id)
            .ok_or_else(|| PlanError::UnknownVertex(id.to_string()))
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<VertexIndex> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn vertex(&self, v: VertexIndex) -> &Vertex {
        &self.vertices[v]
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn edge(&self, e: EdgeIndex) -> &Edge {
        &self.edges[e]
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn outgoing(&self, v: VertexIndex) -> &[EdgeIndex] {
        &self.outgoing[v]
    }

    #[must_use]
    pub fn incoming(&self, v: VertexIndex) -> &[EdgeIndex] {
        &self.incoming[v]
    }

    /// Edges touching `v` in either direction, paired with the opposite endpoint.
    pub fn incident(&self, v: VertexIndex) -> impl Iterator<Item = (EdgeIndex, VertexIndex)> + '_ {
        let out = self.outgoing[v].iter().map(|&e| (e, self.edges[e].target));
        let inc = self.incoming[v].iter().map(|&e| (e, self.edges[e].source));
        out.chain(inc)
    }

    /// Edges with both endpoints in `set`, in edge-index order.
    #[must_use]
    pub fn induced_edges(&self, set: &BTreeSet<VertexIndex>) -> Vec<EdgeIndex> {
        let mut edges: Vec<EdgeIndex> = set
            .iter()
            .flat_map(|&v| self.outgoing[v].iter().copied())
            .filter(|&e| set.contains(&self.edges[e].target))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Weak connectivity of the subgraph induced by `set`. The empty set is not connected.
    #[must_use]
    pub fn is_connected(&self, set: &BTreeSet<VertexIndex>) -> bool {
        let Some(&start) = set.iter().next() else {
            return false;
        };
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for (_, other) in self.incident(v) {
                if set.contains(&other) && seen.insert(other) {
                    queue.push_back(other);
                }
            }
        }
        seen.len() == set.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_plus_island() -> Result<WeightedGraph> {
        let mut g = WeightedGraph::new();
        for id in ["a", "b", "c", "d"] {
            g.add_vertex(Vertex::new(id, format!("m-{id}")))?;
        }
        g.add_edge("a", "b", ":ARG0")?;
        g.add_edge("b", "c", "mod")?;
        g.add_edge("c", "a", "ARG1")?;
        Ok(g)
    }

    #[test]
    fn duplicate_ids_are_rejected() -> Result<()> {
        let mut g = WeightedGraph::new();
        g.add_vertex(Vertex::new("a", "x"))?;
        assert!(matches!(
            g.add_vertex(Vertex::new("a", "y")),
            Err(PlanError::DuplicateVertex(id)) if id == "a"
        ));
        Ok(())
    }

    #[test]
    fn unknown_endpoint_is_rejected() -> Result<()> {
        let mut g = WeightedGraph::new();
        g.add_vertex(Vertex::new("a", "x"))?;
        assert!(matches!(
            g.add_edge("a", "zz", "ARG0"),
            Err(PlanError::UnknownVertex(id)) if id == "zz"
        ));
        Ok(())
    }

    #[test]
    fn labels_lose_leading_colon() -> Result<()> {
        let g = triangle_plus_island()?;
        assert_eq!(g.edge(0).label, "ARG0");
        Ok(())
    }

    #[test]
    fn induced_edges_and_connectivity() -> Result<()> {
        let g = triangle_plus_island()?;
        let abc: BTreeSet<_> = [0, 1, 2].into();
        assert_eq!(g.induced_edges(&abc), vec![0, 1, 2]);
        assert!(g.is_connected(&abc));

        let ad: BTreeSet<_> = [0, 3].into();
        assert!(g.induced_edges(&ad).is_empty());
        assert!(!g.is_connected(&ad));
        assert!(!g.is_connected(&BTreeSet::new()));
        Ok(())
    }

    #[test]
    fn json_spec_round_trip() -> Result<()> {
        let json = r#"{
            "vertices": [
                {"id": "v1", "meaning": "bn:dog", "sources": ["s1"], "bias": 0.4},
                {"id": "v2", "meaning": "bn:bark"}
            ],
            "edges": [{"source": "v2", "target": "v1", "label": ":ARG0"}]
        }"#;
        let g = WeightedGraph::from_json(json)?;
        assert_eq!(g.vertex_count(), 2);
        assert!((g.vertex(1).bias - 1.0).abs() < f64::EPSILON);
        assert_eq!(g.outgoing(1), &[0]);
        assert_eq!(g.incoming(0), &[0]);
        Ok(())
    }
}
