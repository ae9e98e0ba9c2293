// src/exit.rs
//! Standardized process exit codes for `semrank`.
//!
//! Provides a stable contract for scripts and automation.

use crate::error::PlanError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlanExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, config).
    Error = 1,
    /// Input validation failed (unparseable graph, unknown vertex, bad config value).
    InvalidInput = 2,
    /// Ranking did not converge within the iteration cap.
    NonConvergence = 3,
}

impl PlanExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for a failed run by inspecting the root cause.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<PlanError>() {
            Some(PlanError::NonConvergence { .. }) => Self::NonConvergence,
            Some(
                PlanError::Parse(_)
                | PlanError::UnknownVertex(_)
                | PlanError::DuplicateVertex(_)
                | PlanError::InvalidConfig(_),
            ) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for PlanExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
