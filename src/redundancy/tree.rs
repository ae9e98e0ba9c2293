// src/redundancy/tree.rs
//! Ordered tree view of an induced subgraph.
//!
//! Every vertex is expanded once, at its first occurrence in breadth-first
//! order. Each further incoming edge (re-entrancy, coreference, a cycle back to
//! an ancestor) contributes a childless copy carrying that edge's role, so the
//! tree has one node per root plus one per edge. Children are ordered by edge
//! role, then meaning, which makes the tree, and every distance computed on it,
//! reproducible.

use crate::graph::{Subgraph, VertexIndex, WeightedGraph};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'g> {
    /// Label of the edge from the parent; empty for roots.
    pub role: &'g str,
    /// Empty for the synthetic root joining several top-level vertices.
    pub meaning: &'g str,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct CanonicalTree<'g> {
    nodes: Vec<TreeNode<'g>>,
    origin: Vec<Option<VertexIndex>>,
    root: Option<usize>,
}

impl<'g> CanonicalTree<'g> {
    #[must_use]
    pub fn from_subgraph(sub: &Subgraph<'g>) -> Self {
        let graph = sub.graph();
        let set = sub.vertices();
        if set.is_empty() {
            return Self::default();
        }

        let children = ordered_children(graph, set);
        let roots = top_level(graph, set, &children);

        let mut tree = Self::default();
        let mut expanded: BTreeSet<VertexIndex> = roots.iter().copied().collect();
        let mut work = VecDeque::new();
        let root = if let [only] = roots.as_slice() {
            let node = tree.push("", graph.vertex(*only).meaning.as_str(), Some(*only));
            work.push_back(node);
            node
        } else {
            let top = tree.push("", "", None);
            for &r in &roots {
                let node = tree.push("", graph.vertex(r).meaning.as_str(), Some(r));
                tree.nodes[top].children.push(node);
                work.push_back(node);
            }
            top
        };
        tree.root = Some(root);

        while let Some(node) = work.pop_front() {
            let Some(v) = tree.origin[node] else {
                continue;
            };
            for &(label, child) in children.get(&v).map_or(&[][..], Vec::as_slice) {
                let c = tree.push(label, graph.vertex(child).meaning.as_str(), Some(child));
                tree.nodes[node].children.push(c);
                if expanded.insert(child) {
                    work.push_back(c);
                }
            }
        }
        tree
    }

    fn push(&mut self, role: &'g str, meaning: &'g str, origin: Option<VertexIndex>) -> usize {
        self.nodes.push(TreeNode {
            role,
            meaning,
            children: Vec::new(),
        });
        self.origin.push(origin);
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    #[must_use]
    pub fn node(&self, i: usize) -> &TreeNode<'g> {
        &self.nodes[i]
    }

    /// Arena indices in post-order (children left to right, then the parent).
    #[must_use]
    pub fn postorder(&self) -> Vec<usize> {
        let Some(root) = self.root else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(root, 0)];
        while let Some((node, next_child)) = stack.pop() {
            if let Some(&child) = self.nodes[node].children.get(next_child) {
                stack.push((node, next_child + 1));
                stack.push((child, 0));
            } else {
                out.push(node);
            }
        }
        out
    }

    /// `(role, meaning, arity)` in post-order. Equal signatures mean equal trees.
    #[must_use]
    pub fn signature(&self) -> Vec<(&'g str, &'g str, usize)> {
        self.postorder()
            .into_iter()
            .map(|i| {
                let n = &self.nodes[i];
                (n.role, n.meaning, n.children.len())
            })
            .collect()
    }
}

/// Out-edges inside the subgraph per vertex, sorted by (role, meaning, index).
fn ordered_children<'g>(
    graph: &'g WeightedGraph,
    set: &BTreeSet<VertexIndex>,
) -> BTreeMap<VertexIndex, Vec<(&'g str, VertexIndex)>> {
    set.iter()
        .map(|&v| {
            let mut out: Vec<(&'g str, VertexIndex)> = graph
                .outgoing(v)
                .iter()
                .map(|&e| graph.edge(e))
                .filter(|e| set.contains(&e.target))
                .map(|e| (e.label.as_str(), e.target))
                .collect();
            out.sort_by(|a, b| {
                (a.0, graph.vertex(a.1).meaning.as_str(), a.1)
                    .cmp(&(b.0, graph.vertex(b.1).meaning.as_str(), b.1))
            });
            (v, out)
        })
        .collect()
}

/// Vertices with no parent inside the subgraph, plus one representative per
/// region only reachable through a cycle. Sorted by (meaning, index).
fn top_level(
    graph: &WeightedGraph,
    set: &BTreeSet<VertexIndex>,
    children: &BTreeMap<VertexIndex, Vec<(&str, VertexIndex)>>,
) -> Vec<VertexIndex> {
    let has_parent: BTreeSet<VertexIndex> = children
        .values()
        .flat_map(|c| c.iter().map(|(_, t)| *t))
        .collect();
    let by_meaning = |a: &VertexIndex, b: &VertexIndex| {
        (graph.vertex(*a).meaning.as_str(), *a).cmp(&(graph.vertex(*b).meaning.as_str(), *b))
    };

    let mut roots: Vec<VertexIndex> = set
        .iter()
        .copied()
        .filter(|v| !has_parent.contains(v))
        .collect();
    let mut covered = BTreeSet::new();
    let mut queue: VecDeque<VertexIndex> = roots.iter().copied().collect();
    loop {
        while let Some(v) = queue.pop_front() {
            if covered.insert(v) {
                if let Some(cs) = children.get(&v) {
                    queue.extend(cs.iter().map(|(_, c)| *c));
                }
            }
        }
        let Some(extra) = set
            .iter()
            .copied()
            .filter(|v| !covered.contains(v))
            .min_by(by_meaning)
        else {
            break;
        };
        roots.push(extra);
        queue.push_back(extra);
    }
    roots.sort_by(by_meaning);
    roots
}
