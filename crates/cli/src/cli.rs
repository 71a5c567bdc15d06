//! Command-line argument definitions

use crate::logging::LogLevel;
use clap::{Parser, Subcommand};

/// Content-key artifact cache for CI task runners
#[derive(Debug, Parser)]
#[command(name = "stash", version, about)]
pub struct Cli {
    /// Log level filter (overrides RUST_LOG)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Restore cached paths for the first matching key
    Restore {
        /// Paths or glob patterns to restore, relative to the workspace
        #[arg(long = "path", value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// Primary cache key
        #[arg(long)]
        key: String,

        /// Ordered fallback keys probed after the primary key misses
        #[arg(long = "restore-key", value_name = "KEY")]
        restore_keys: Vec<String>,

        /// Report a hit without downloading or extracting
        #[arg(long)]
        lookup_only: bool,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Package paths and store them under a key
    Save {
        /// Paths or glob patterns to cache, relative to the workspace
        #[arg(long = "path", value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// Cache key to store under
        #[arg(long)]
        key: String,

        /// Emit the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse the process arguments
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
