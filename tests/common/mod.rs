// tests/common/mod.rs - shared graph fixtures
#![allow(dead_code)]

use semrank_core::graph::{Vertex, WeightedGraph};

/// "The little boy does not want to go." / "The girl believes the boy."
///
/// want-01 -ARG0-> boy, want-01 -ARG1-> go-02, go-02 -ARG0-> boy,
/// want-01 -polarity-> "-", boy -mod-> little,
/// believe-01 -ARG0-> girl, believe-01 -ARG1-> boy
pub fn amr() -> WeightedGraph {
    let mut g = WeightedGraph::new();
    g.add_vertex(Vertex::new("w", "want-01").with_source("s1")).unwrap();
    g.add_vertex(Vertex::new("b", "boy").with_source("s1").with_source("s2")).unwrap();
    g.add_vertex(Vertex::new("g", "go-02").with_source("s1")).unwrap();
    g.add_vertex(Vertex::new("n", "-").with_source("s1")).unwrap();
    g.add_vertex(Vertex::new("l", "little").with_source("s1")).unwrap();
    g.add_vertex(Vertex::new("bl", "believe-01").with_source("s2")).unwrap();
    g.add_vertex(Vertex::new("gi", "girl").with_source("s2")).unwrap();
    g.add_edge("w", "b", ":ARG0").unwrap();
    g.add_edge("w", "g", ":ARG1").unwrap();
    g.add_edge("g", "b", ":ARG0").unwrap();
    g.add_edge("w", "n", ":polarity").unwrap();
    g.add_edge("b", "l", ":mod").unwrap();
    g.add_edge("bl", "gi", ":ARG0").unwrap();
    g.add_edge("bl", "b", ":ARG1").unwrap();
    g
}

/// A - B - C - D joined by modifier edges.
pub fn path() -> WeightedGraph {
    let mut g = WeightedGraph::new();
    for id in ["A", "B", "C", "D"] {
        g.add_vertex(Vertex::new(id, id.to_lowercase())).unwrap();
    }
    g.add_edge("A", "B", "mod").unwrap();
    g.add_edge("B", "C", "mod").unwrap();
    g.add_edge("C", "D", "mod").unwrap();
    g
}

pub const GRAPH_JSON: &str = r#"{
  "vertices": [
    { "id": "w",  "meaning": "want-01",    "sources": ["s1"] },
    { "id": "b",  "meaning": "boy",        "sources": ["s1", "s2"], "bias": 2.0 },
    { "id": "g",  "meaning": "go-02",      "sources": ["s1"] },
    { "id": "n",  "meaning": "-",          "sources": ["s1"], "bias": 0.5 },
    { "id": "l",  "meaning": "little",     "sources": ["s1"] },
    { "id": "bl", "meaning": "believe-01", "sources": ["s2"] },
    { "id": "gi", "meaning": "girl",       "sources": ["s2"], "bias": 1.5 }
  ],
  "edges": [
    { "source": "w",  "target": "b",  "label": ":ARG0" },
    { "source": "w",  "target": "g",  "label": ":ARG1" },
    { "source": "g",  "target": "b",  "label": ":ARG0" },
    { "source": "w",  "target": "n",  "label": ":polarity" },
    { "source": "b",  "target": "l",  "label": ":mod" },
    { "source": "bl", "target": "gi", "label": ":ARG0" },
    { "source": "bl", "target": "b",  "label": ":ARG1" }
  ]
}"#;

pub const SIMILARITY_JSON: &str = r#"[
  { "a": "boy",     "b": "girl",       "score": 0.8 },
  { "a": "want-01", "b": "believe-01", "score": 0.4 },
  { "a": "go-02",   "b": "want-01",    "score": 0.2 },
  { "a": "little",  "b": "boy",        "score": 0.3 }
]"#;
