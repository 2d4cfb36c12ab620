//! # refix_core
//!
//! Cache-aware run loop for Refix.
//!
//! This crate provides:
//! - The `Runner` orchestrator that drives a [`FileProcessor`] over files
//! - Run configuration loading
//! - The incremental cache protocol (staleness gate, skip, record)
//! - Parallel processing
//!
//! ## Example
//!
//! ```rust,ignore
//! use refix_core::{Runner, RunConfig};
//!
//! let config = RunConfig::from_file(".refix.json")?;
//! let mut runner = Runner::new(config, my_fixer);
//!
//! let report = runner.run(&files);
//! println!("{} skipped, {} fixed", report.cached(), report.fixed());
//! runner.finish();
//! ```

mod config;
mod error;
mod file_runner;
mod key;
mod parallel_runner;
mod processor;
mod result;
mod runner;

pub use config::RunConfig;
pub use error::EngineError;
pub use file_runner::{FileContext, run_file, run_files};
pub use key::file_key;
pub use parallel_runner::run_files_parallel;
pub use processor::{FileProcessor, ProcessError, Processed};
pub use result::{FileOutcome, FileReport, RunReport};
pub use runner::{Runner, cache_is_usable};

pub use refix_cache::{Cache, CacheStore, FileCache, RuleSignature};

/// Version of the running engine.
///
/// Recorded in every cache built by [`Runner`], so upgrading the engine
/// invalidates caches written by older versions.
pub const RUNTIME_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub mod test_utils;
