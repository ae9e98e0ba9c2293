// tests/unit_config.rs
use semrank_core::config::{io, ExplorerKind, NeighbourPolicy, PlannerConfig, SelectionKind};
use semrank_core::error::PlanError;
use std::fs;

#[test]
fn test_load_toml() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(io::CONFIG_FILE);
    fs::write(
        &path,
        "[extraction]\nselection = \"arg_max\"\nseed = 7\nneighbours = \"same_source\"\n\n[redundancy]\nkeep_count = 3\n",
    )
    .unwrap();
    let c = PlannerConfig::load(&path).unwrap();
    assert_eq!(c.extraction.selection, SelectionKind::ArgMax);
    assert_eq!(c.extraction.seed, 7);
    assert_eq!(c.extraction.neighbours, NeighbourPolicy::SameSource);
    assert_eq!(c.redundancy.keep_count, 3);
    // Untouched keys keep their defaults.
    assert_eq!(c.extraction.explorer, ExplorerKind::Requirements);
    assert!((c.ranking.vertex_damping - 0.2).abs() < f64::EPSILON);
}

#[test]
fn test_missing_file_gives_defaults() {
    let d = tempfile::tempdir().unwrap();
    let c = PlannerConfig::load(&d.path().join("nope.toml")).unwrap();
    assert_eq!(c, PlannerConfig::default());
}

#[test]
fn test_defaults() {
    let c = PlannerConfig::default();
    assert!((c.ranking.meaning_damping - 0.5).abs() < f64::EPSILON);
    assert!((c.ranking.stopping_threshold - 1e-6).abs() < f64::EPSILON);
    assert_eq!(c.ranking.max_iterations, 100_000);
    assert!(c.ranking.symmetric && c.ranking.make_positive && c.ranking.rebase);
    assert_eq!(c.extraction.selection, SelectionKind::SoftMax);
    assert_eq!(c.extraction.target_count, 10);
    assert_eq!(c.extraction.max_extractions, 1_000);
    assert!((c.redundancy.threshold - 0.5).abs() < f64::EPSILON);
    assert_eq!(c.redundancy.keep_count, 5);
}

#[test]
fn test_out_of_range_damping_is_rejected() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(io::CONFIG_FILE);
    fs::write(&path, "[ranking]\nvertex_damping = 1.5\n").unwrap();
    match PlannerConfig::load(&path) {
        Err(PlanError::InvalidConfig(msg)) => assert!(msg.contains("ranking.vertex_damping")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(io::CONFIG_FILE);
    fs::write(&path, "[ranking\nvertex_damping = ").unwrap();
    assert!(matches!(PlannerConfig::load(&path), Err(PlanError::Parse(_))));
}

#[test]
fn test_saved_config_loads_back() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join(io::CONFIG_FILE);
    let mut c = PlannerConfig::default();
    c.extraction.temperature = 0.25;
    c.redundancy.role_weight = 0.8;
    io::save(&c, &path).unwrap();
    assert_eq!(PlannerConfig::load(&path).unwrap(), c);
}
