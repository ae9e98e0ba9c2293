// tests/unit_redundancy.rs
mod common;

use semrank_core::graph::{Subgraph, Vertex, VertexIndex, WeightedGraph};
use semrank_core::oracle::SimilarityTable;
use semrank_core::redundancy::{CanonicalTree, RedundancyRemover, TreeEditSimilarity};
use std::collections::BTreeSet;

fn sub<'g>(g: &'g WeightedGraph, ids: &[&str], value: f64) -> Subgraph<'g> {
    let vertices: BTreeSet<VertexIndex> = ids.iter().map(|id| g.index_of(id).unwrap()).collect();
    let root = *vertices.iter().next().unwrap();
    Subgraph::new(g, vertices, root, None, value)
}

fn candidates(g: &WeightedGraph) -> Vec<Subgraph<'_>> {
    vec![
        sub(g, &["w", "b", "g"], 2.0),
        sub(g, &["w", "b", "g", "n"], 2.5),
        sub(g, &["bl", "gi", "b"], 1.8),
        sub(g, &["b", "l"], 0.7),
        sub(g, &["w", "b", "g", "l"], 2.2),
        sub(g, &["bl", "gi", "b", "l"], 1.1),
    ]
}

#[test]
fn test_identical_subgraphs_collapse_to_one() {
    let g = common::amr();
    let table = SimilarityTable::new();
    let remover = RedundancyRemover::new(&table, 0.5, 0.5);
    let twins = vec![sub(&g, &["w", "b", "g"], 1.0), sub(&g, &["w", "b", "g"], 1.0)];
    let kept = remover.filter(twins, 5);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_filter_is_idempotent() {
    let g = common::amr();
    let table = SimilarityTable::from_json(common::SIMILARITY_JSON).unwrap();
    for threshold in [0.3, 0.5, 0.8] {
        let remover = RedundancyRemover::new(&table, threshold, 0.5);
        for keep in [1, 2, 5] {
            let once = remover.filter(candidates(&g), keep);
            let twice = remover.filter(once.clone(), keep);
            assert_eq!(once, twice);
            assert!(once.len() <= keep);
        }
    }
}

#[test]
fn test_output_is_ordered_by_value() {
    let g = common::amr();
    let table = SimilarityTable::new();
    let remover = RedundancyRemover::new(&table, 1.0, 0.5);
    let kept = remover.filter(candidates(&g), 10);
    assert_eq!(kept.len(), 6);
    assert!(kept.windows(2).all(|w| w[0].value() >= w[1].value()));
}

#[test]
fn test_similarity_is_symmetric_and_bounded() {
    let g = common::amr();
    let table = SimilarityTable::from_json(common::SIMILARITY_JSON).unwrap();
    let s = TreeEditSimilarity::new(&table, 0.5);
    let subs = candidates(&g);
    for a in &subs {
        assert_eq!(s.similarity(a, a), 1.0);
        for b in &subs {
            let ab = s.similarity(a, b);
            assert_eq!(ab, s.similarity(b, a));
            assert!((0.0..=1.0).contains(&ab));
        }
    }
}

#[test]
fn test_coreferent_vertex_is_replicated_in_tree() {
    let g = common::amr();
    // boy is reached from both want-01 and go-02.
    let tree = CanonicalTree::from_subgraph(&sub(&g, &["w", "b", "g"], 0.0));
    assert_eq!(tree.len(), 4);
}

#[test]
fn test_related_meanings_score_closer_than_unrelated() {
    let g = common::amr();
    let table = SimilarityTable::from_json(common::SIMILARITY_JSON).unwrap();
    let s = TreeEditSimilarity::new(&table, 0.5);
    let boy_little = sub(&g, &["b", "l"], 0.0);
    let believe_girl = sub(&g, &["bl", "gi"], 0.0);
    let want_go = sub(&g, &["w", "g"], 0.0);
    // want-01 / believe-01 relate, and both trees have an ARG child.
    assert!(s.similarity(&want_go, &believe_girl) > s.similarity(&want_go, &boy_little));
}

#[test]
fn test_converging_roles_keep_tree_linear() {
    // Each step is reached twice (ARG0 and ARG1), so paths double per level.
    let mut g = WeightedGraph::new();
    let depth = 16;
    for i in 0..=depth {
        g.add_vertex(Vertex::new(format!("v{i}"), "step")).unwrap();
    }
    for i in 0..depth {
        let (from, to) = (format!("v{i}"), format!("v{}", i + 1));
        g.add_edge(&from, &to, "ARG0").unwrap();
        g.add_edge(&from, &to, "ARG1").unwrap();
    }
    let whole = Subgraph::new(&g, (0..=depth).collect(), 0, None, 1.0);
    let tree = CanonicalTree::from_subgraph(&whole);
    assert_eq!(tree.len(), g.edge_count() + 1);

    let table = SimilarityTable::new();
    let s = TreeEditSimilarity::new(&table, 0.5);
    assert_eq!(s.similarity(&whole, &whole), 1.0);
}
