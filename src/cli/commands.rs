//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated query cursor CLI
#[derive(Parser, Debug)]
#[command(name = "query-cursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Query configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the query and print every row
    Run {
        /// Resume from this continuation token
        #[arg(long)]
        continuation: Option<String>,

        /// Stop after this many rows and print the continuation token to stderr
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Validate the query configuration
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
