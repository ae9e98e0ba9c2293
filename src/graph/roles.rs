// src/graph/roles.rs
//! Role requiredness: which endpoint of a labelled edge must accompany the other.
//!
//! Core argument roles (`ARGn`, `opN`, `sntN`, `name`) make the governor pull in
//! its argument, so the *target* is required once the source is present. Inverse
//! arguments (`ARGn-of`) flip that. Polarity, quantifier and mode modifiers
//! cannot stand alone, so they require their *source* head. Any other role only
//! pulls in an interrogative or choice marker.

use super::{Edge, VertexIndex, WeightedGraph};

/// Meanings that must never be left outside a subgraph touching them.
pub const MARKER_MEANINGS: &[&str] = &["amr-unknown", "amr-choice"];

const HEAD_REQUIRING: &[&str] = &["polarity", "quant", "mode"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requires {
    /// The target is required whenever the source is present.
    Target,
    /// The source is required whenever the target is present.
    Source,
    /// Only interrogative/choice markers are pulled in, from either side.
    MarkerOnly,
}

/// Strips the optional leading `:` of AMR-style role labels.
#[must_use]
pub fn normalize(label: &str) -> &str {
    label.strip_prefix(':').unwrap_or(label)
}

fn numbered(label: &str, prefix: &str) -> bool {
    label
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// True for argument roles (`ARGn`, `opN`, `sntN`, `name`) and their inverses.
#[must_use]
pub fn is_core(label: &str) -> bool {
    let label = normalize(label);
    let base = label.strip_suffix("-of").unwrap_or(label);
    numbered(base, "ARG") || numbered(base, "op") || numbered(base, "snt") || base == "name"
}

#[must_use]
pub fn requiredness(label: &str) -> Requires {
    let label = normalize(label);
    if let Some(base) = label.strip_suffix("-of") {
        if is_core(base) {
            return Requires::Source;
        }
    }
    if is_core(label) {
        Requires::Target
    } else if HEAD_REQUIRING.contains(&label) {
        Requires::Source
    } else {
        Requires::MarkerOnly
    }
}

#[must_use]
pub fn is_marker(meaning: &str) -> bool {
    MARKER_MEANINGS.contains(&meaning)
}

/// The endpoint of `edge` that must join a set already holding `present`, if any.
#[must_use]
pub fn required_endpoint(
    graph: &WeightedGraph,
    edge: &Edge,
    present: VertexIndex,
) -> Option<VertexIndex> {
    let other = if edge.source == present {
        edge.target
    } else {
        edge.source
    };
    match requiredness(&edge.label) {
        Requires::Target if edge.source == present => Some(edge.target),
        Requires::Source if edge.target == present => Some(edge.source),
        Requires::MarkerOnly if is_marker(&graph.vertex(other).meaning) => Some(other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_roles() {
        for label in ["ARG0", ":ARG1", "op2", "snt1", "name", "ARG0-of"] {
            assert!(is_core(label), "{label} should be core");
        }
        for label in ["mod", "ARG", "opx", "polarity", "location"] {
            assert!(!is_core(label), "{label} should not be core");
        }
    }

    #[test]
    fn directionality_per_role() {
        assert_eq!(requiredness("ARG1"), Requires::Target);
        assert_eq!(requiredness(":ARG0-of"), Requires::Source);
        assert_eq!(requiredness("polarity"), Requires::Source);
        assert_eq!(requiredness("quant"), Requires::Source);
        assert_eq!(requiredness("time"), Requires::MarkerOnly);
    }
}
