//! refix-cache CLI
//!
//! Inspects and maintains the incremental cache written by Refix runs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use refix_core::RunConfig;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Configuration file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = ".refix.json";

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(needs_attention) => {
            if needs_attention {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let cache_path = cli
        .cache_file
        .clone()
        .unwrap_or_else(|| config.cache_path());

    match &cli.command {
        Commands::Show { json } => commands::show::run_show(&cache_path, *json),
        Commands::Status => commands::status::run_status(&cache_path, &config),
        Commands::Check { paths } => commands::check::run_check(&cache_path, &config, paths),
        Commands::Forget { keys } => commands::forget::run_forget(&cache_path, keys),
        Commands::Clear => commands::forget::run_clear(&cache_path),
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::from_file(path).into_diagnostic(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default.exists() {
                RunConfig::from_file(&default).into_diagnostic()
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}
