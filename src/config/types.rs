use serde::{Deserialize, Serialize};

/// Tunables for both ranking passes and the power iteration behind them.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_meaning_damping")]
    pub meaning_damping: f64,
    #[serde(default = "default_vertex_damping")]
    pub vertex_damping: f64,
    #[serde(default)]
    pub sim_threshold: f64,
    #[serde(default = "default_stopping_threshold")]
    pub stopping_threshold: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_true")]
    pub symmetric: bool,
    #[serde(default = "default_true")]
    pub make_positive: bool,
    #[serde(default = "default_true")]
    pub rebase: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            meaning_damping: default_meaning_damping(),
            vertex_damping: default_vertex_damping(),
            sim_threshold: 0.0,
            stopping_threshold: default_stopping_threshold(),
            max_iterations: default_max_iterations(),
            symmetric: true,
            make_positive: true,
            rebase: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    ArgMax,
    #[default]
    SoftMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExplorerKind {
    SingleVertex,
    #[default]
    Requirements,
}

/// Which unvisited neighbours may join a growing subgraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NeighbourPolicy {
    SameSource,
    NonCoreOnly,
    #[default]
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default)]
    pub selection: SelectionKind,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub explorer: ExplorerKind,
    #[serde(default)]
    pub neighbours: NeighbourPolicy,
    #[serde(default = "default_target_count")]
    pub target_count: usize,
    #[serde(default = "default_max_extractions")]
    pub max_extractions: usize,
    #[serde(default)]
    pub seed: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lambda: default_lambda(),
            selection: SelectionKind::default(),
            temperature: default_temperature(),
            explorer: ExplorerKind::default(),
            neighbours: NeighbourPolicy::default(),
            target_count: default_target_count(),
            max_extractions: default_max_extractions(),
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedundancyConfig {
    #[serde(default = "default_redundancy_threshold")]
    pub threshold: f64,
    /// Share of the replace cost decided by role equality (δ).
    #[serde(default = "default_role_weight")]
    pub role_weight: f64,
    #[serde(default = "default_keep_count")]
    pub keep_count: usize,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            threshold: default_redundancy_threshold(),
            role_weight: default_role_weight(),
            keep_count: default_keep_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub redundancy: RedundancyConfig,
}

const fn default_true() -> bool { true }
const fn default_meaning_damping() -> f64 { 0.5 }
const fn default_vertex_damping() -> f64 { 0.2 }
const fn default_stopping_threshold() -> f64 { 1e-6 }
const fn default_max_iterations() -> usize { 100_000 }

const fn default_lambda() -> f64 { 1.0 }
const fn default_temperature() -> f64 { 1e-3 }
const fn default_target_count() -> usize { 10 }
const fn default_max_extractions() -> usize { 1_000 }

const fn default_redundancy_threshold() -> f64 { 0.5 }
const fn default_role_weight() -> f64 { 0.5 }
const fn default_keep_count() -> usize { 5 }
