//! Command dispatch logic extracted from the binary.

use super::{
    args::Commands,
    handlers::{handle_config, handle_plan, handle_rank},
};
use crate::exit::PlanExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<PlanExit> {
    match command {
        Commands::Rank { input } => handle_rank(&input),
        Commands::Plan { input, seed } => handle_plan(&input, seed),
        Commands::Config { config } => handle_config(config.as_deref()),
    }
}
