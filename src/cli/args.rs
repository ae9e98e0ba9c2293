use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "semrank",
    version,
    about = "Rank, extract and filter content patterns in semantic graphs"
)]
pub struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Inputs shared by every command that reads a graph.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Graph as JSON: `{ "vertices": [...], "edges": [...] }`
    #[arg(long, value_name = "FILE")]
    pub graph: PathBuf,
    /// Meaning similarities as JSON: `[{ "a", "b", "score" }]`
    #[arg(long, value_name = "FILE")]
    pub similarity: Option<PathBuf>,
    /// Config file (defaults to `semrank.toml` when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Print JSON instead of the terminal report
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank graph vertices with biased PageRank
    Rank {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Rank vertices, extract subgraphs and drop redundant ones
    Plan {
        #[command(flatten)]
        input: InputArgs,
        /// Override `extraction.seed`
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}
