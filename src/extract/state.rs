// src/extract/state.rs
use crate::graph::{Subgraph, VertexIndex, WeightedGraph};
use std::collections::BTreeSet;

/// A connected candidate subgraph under construction.
///
/// Expansion never mutates a state; it produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    root: VertexIndex,
    source: Option<String>,
    vertices: BTreeSet<VertexIndex>,
}

impl State {
    /// The root is always part of the vertex set.
    #[must_use]
    pub fn new(
        root: VertexIndex,
        source: Option<String>,
        mut vertices: BTreeSet<VertexIndex>,
    ) -> Self {
        vertices.insert(root);
        Self {
            root,
            source,
            vertices,
        }
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
    pub fn vertices(&self) -> &BTreeSet<VertexIndex> {
        &self.vertices
    }

    #[must_use]
    pub fn contains(&self, v: VertexIndex) -> bool {
        self.vertices.contains(&v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A new state holding this state's vertices plus `extra`.
    #[must_use]
    pub fn extend(&self, extra: &BTreeSet<VertexIndex>) -> Self {
        Self {
            root: self.root,
            source: self.source.clone(),
            vertices: self.vertices.union(extra).copied().collect(),
        }
    }

    #[must_use]
    pub fn into_subgraph(self, graph: &WeightedGraph, value: f64) -> Subgraph<'_> {
        Subgraph::new(graph, self.vertices, self.root, self.source, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_always_included() {
        let s = State::new(3, None, BTreeSet::from([1]));
        assert!(s.contains(3));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn extend_leaves_original_untouched() {
        let s = State::new(0, Some("s1".into()), BTreeSet::new());
        let t = s.extend(&BTreeSet::from([1, 2]));
        assert_eq!(s.len(), 1);
        assert_eq!(t.len(), 3);
        assert_eq!(t.source(), Some("s1"));
        assert_eq!(t.root(), 0);
    }
}
