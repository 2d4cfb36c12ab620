//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// refix-cache - Inspect and maintain Refix incremental caches
#[derive(Parser)]
#[command(name = "refix-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run configuration file (defaults to .refix.json when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Cache file path (overrides the configuration)
    #[arg(long, global = true)]
    pub cache_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cache's configuration fingerprint and entries
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report whether the cache is usable under the current configuration
    Status,

    /// Report which files the next run would skip
    Check {
        /// Files to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove entries so the files are reprocessed next run
    Forget {
        /// File keys to remove
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Delete the cache file
    Clear,
}
