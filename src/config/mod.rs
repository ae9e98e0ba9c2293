// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{
    ExplorerKind, ExtractionConfig, NeighbourPolicy, PlannerConfig, RankingConfig,
    RedundancyConfig, SelectionKind,
};
use crate::error::{PlanError, Result};
use std::path::Path;

impl PlannerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, or defaults when it does not exist, and validates the result.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let config = io::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every tunable is inside its meaningful range.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let r = &self.ranking;
        check_unit("ranking.meaning_damping", r.meaning_damping)?;
        check_unit("ranking.vertex_damping", r.vertex_damping)?;
        check_unit("ranking.sim_threshold", r.sim_threshold)?;
        check_positive("ranking.stopping_threshold", r.stopping_threshold)?;
        check_nonzero("ranking.max_iterations", r.max_iterations)?;

        let e = &self.extraction;
        if !(e.lambda.is_finite() && e.lambda >= 0.0) {
            return Err(invalid("extraction.lambda", e.lambda));
        }
        check_positive("extraction.temperature", e.temperature)?;
        check_nonzero("extraction.max_extractions", e.max_extractions)?;

        let d = &self.redundancy;
        check_unit("redundancy.threshold", d.threshold)?;
        check_unit("redundancy.role_weight", d.role_weight)?;
        Ok(())
    }
}

fn invalid(key: &str, value: impl std::fmt::Display) -> PlanError {
    PlanError::InvalidConfig(format!("{key} = {value}"))
}

fn check_unit(key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, value))
    }
}

fn check_positive(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, value))
    }
}

fn check_nonzero(key: &str, value: usize) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(key, value))
    }
}
