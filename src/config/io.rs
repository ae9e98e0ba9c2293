// src/config/io.rs
//! Loading and saving `semrank.toml`.

use super::types::PlannerConfig;
use crate::error::{PlanError, Result};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "semrank.toml";

/// Reads a config file. A missing file yields the defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load(path: &Path) -> Result<PlannerConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PlannerConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| PlanError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse(&content)
}

/// Parses config text. Absent sections and keys fall back to their defaults.
///
/// # Errors
/// Returns error on malformed TOML.
pub fn parse(content: &str) -> Result<PlannerConfig> {
    Ok(toml::from_str(content)?)
}

/// Renders a config as TOML.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render(config: &PlannerConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| PlanError::Parse(e.to_string()))
}

/// Writes a config to disk.
///
/// # Errors
/// Returns error if serialization or the file write fails.
pub fn save(config: &PlannerConfig, path: &Path) -> Result<()> {
    let content = render(config)?;
    fs::write(path, content).map_err(|source| PlanError::Io {
        source,
        path: path.to_path_buf(),
    })
}
