// src/extract/explorer.rs
//! Graph-structural growth policy: which vertices must travel together and
//! which neighbours a state may expand into.

use super::state::State;
use crate::config::{ExplorerKind, NeighbourPolicy};
use crate::graph::{roles, VertexIndex, WeightedGraph};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Explorer {
    kind: ExplorerKind,
    policy: NeighbourPolicy,
}

impl Explorer {
    #[must_use]
    pub fn new(kind: ExplorerKind, policy: NeighbourPolicy) -> Self {
        Self { kind, policy }
    }

    #[must_use]
    pub fn kind(&self) -> ExplorerKind {
        self.kind
    }

    /// Vertices that must accompany `seed` in any well-formed subgraph.
    ///
    /// `SingleVertex` returns `{seed}`. `Requirements` follows role requiredness
    /// from every vertex added until nothing new appears.
    #[must_use]
    pub fn required_closure(
        &self,
        graph: &WeightedGraph,
        seed: VertexIndex,
    ) -> BTreeSet<VertexIndex> {
        let mut closure = BTreeSet::from([seed]);
        if self.kind == ExplorerKind::SingleVertex {
            return closure;
        }
        let mut work = vec![seed];
        while let Some(v) = work.pop() {
            for (e, _) in graph.incident(v) {
                if let Some(required) = roles::required_endpoint(graph, graph.edge(e), v) {
                    if closure.insert(required) {
                        work.push(required);
                    }
                }
            }
        }
        closure
    }

    /// Adjacent vertices in either direction with the connecting edge label,
    /// sorted and without self-loops.
    #[must_use]
    pub fn neighbours<'g>(
        &self,
        graph: &'g WeightedGraph,
        v: VertexIndex,
    ) -> BTreeSet<(VertexIndex, &'g str)> {
        graph
            .incident(v)
            .filter(|(_, other)| *other != v)
            .map(|(e, other)| (other, graph.edge(e).label.as_str()))
            .collect()
    }

    /// Whether `neighbour`, reached through an edge labelled `label`, may join `state`.
    #[must_use]
    pub fn is_allowed(
        &self,
        graph: &WeightedGraph,
        state: &State,
        neighbour: VertexIndex,
        label: &str,
    ) -> bool {
        if state.contains(neighbour) {
            return false;
        }
        let same_source = match state.source() {
            Some(tag) => graph.vertex(neighbour).sources.contains(tag),
            None => graph.vertex(neighbour).sources.is_empty(),
        };
        match self.policy {
            NeighbourPolicy::All => true,
            NeighbourPolicy::SameSource => same_source,
            NeighbourPolicy::NonCoreOnly => same_source || !roles::is_core(label),
        }
    }

    /// The closure-expanded state rooted at `root` for provenance `source`.
    #[must_use]
    pub fn state_for(
        &self,
        graph: &WeightedGraph,
        root: VertexIndex,
        source: Option<String>,
    ) -> State {
        State::new(root, source, self.required_closure(graph, root))
    }

    /// One start state per vertex and provenance tag. Untagged vertices get one
    /// state without a tag.
    #[must_use]
    pub fn start_states(&self, graph: &WeightedGraph) -> Vec<State> {
        let mut states = Vec::new();
        for v in 0..graph.vertex_count() {
            let sources = &graph.vertex(v).sources;
            if sources.is_empty() {
                states.push(self.state_for(graph, v, None));
            } else {
                states.extend(
                    sources
                        .iter()
                        .map(|s| self.state_for(graph, v, Some(s.clone()))),
                );
            }
        }
        states
    }

    /// Every distinct state reachable by adding one admissible neighbour and its closure.
    #[must_use]
    pub fn next_states(&self, graph: &WeightedGraph, state: &State) -> Vec<State> {
        let mut tried = BTreeSet::new();
        let mut seen = HashSet::new();
        let mut next = Vec::new();
        for &v in state.vertices() {
            for (n, label) in self.neighbours(graph, v) {
                if tried.contains(&n) || !self.is_allowed(graph, state, n, label) {
                    continue;
                }
                tried.insert(n);
                let candidate = state.extend(&self.required_closure(graph, n));
                if seen.insert(candidate.vertices().clone()) {
                    next.push(candidate);
                }
            }
        }
        next
    }
}
