//! Parallel file processing logic.

use std::path::PathBuf;

use parking_lot::Mutex;
use rayon::prelude::*;
use refix_cache::Cache;

use crate::file_runner::{FileContext, collect_report, run_file};
use crate::processor::FileProcessor;
use crate::result::RunReport;

/// Processes files in parallel using rayon.
///
/// All cache reads and writes go through `cache`'s lock, so the shared
/// mapping has a single writer at any time.
pub fn run_files_parallel<C, P>(
    paths: &[PathBuf],
    processor: &P,
    cache: &Mutex<C>,
    ctx: &FileContext<'_>,
) -> RunReport
where
    C: Cache + Send,
    P: FileProcessor + ?Sized,
{
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| run_file(path, processor, cache, ctx).map_err(|e| (path.clone(), e)))
        .collect();

    let mut report = collect_report(results);
    // Keep output deterministic regardless of scheduling.
    report.files.sort_by(|a, b| a.path.cmp(&b.path));
    report
}
