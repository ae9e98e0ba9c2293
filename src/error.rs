// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// Power iteration hit its safety cap before the delta fell under the threshold.
    #[error("power iteration did not converge after {iterations} iterations (last delta {delta:e})")]
    NonConvergence { iterations: usize, delta: f64 },

    #[error("malformed stochastic matrix: {0}")]
    MalformedMatrix(String),

    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("duplicate vertex id: {0}")]
    DuplicateVertex(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        PlanError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for PlanError {
    fn from(e: toml::de::Error) -> Self {
        PlanError::Parse(e.to_string())
    }
}
