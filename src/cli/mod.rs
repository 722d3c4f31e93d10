//! CLI module
//!
//! Command-line interface for running paginated queries.
//!
//! # Commands
//!
//! - `run` - Run a query and print its rows
//! - `validate` - Check a query configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
