//! Single file processing logic.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use refix_cache::{Cache, checksum};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::key::file_key;
use crate::processor::FileProcessor;
use crate::result::{FileOutcome, FileReport, RunReport};

/// Per-run settings shared by every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileContext<'a> {
    /// Base directory for file keys.
    pub base_dir: Option<&'a Path>,

    /// Whether cached fingerprints may be trusted and recorded.
    ///
    /// Must be false when the cache is stale for this run.
    pub use_cache: bool,

    /// Report fixes without writing them.
    pub dry_run: bool,
}

/// Processes one file, consulting and updating `cache`.
///
/// The cache lock is never held while the processor runs. A failure leaves
/// the file's entry untouched so it is reprocessed next time.
pub fn run_file<C, P>(
    path: &Path,
    processor: &P,
    cache: &Mutex<C>,
    ctx: &FileContext<'_>,
) -> Result<FileReport, EngineError>
where
    C: Cache,
    P: FileProcessor + ?Sized,
{
    debug!("Processing {}", path.display());

    let content = fs::read(path)
        .map_err(|e| EngineError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let key = file_key(path, ctx.base_dir);
    let fingerprint = checksum(&content);

    if ctx.use_cache && cache.lock().is_fresh(&key, fingerprint) {
        debug!("Using cached result for {}", path.display());
        return Ok(FileReport {
            path: path.to_path_buf(),
            key,
            outcome: FileOutcome::Cached,
        });
    }

    let processed = processor.process(path, &content)?;

    let (outcome, recorded) = match processed.fixed {
        Some(fixed) if fixed != content => {
            if ctx.dry_run {
                // The file on disk still needs fixing.
                (FileOutcome::WouldFix, None)
            } else {
                fs::write(path, &fixed).map_err(|e| {
                    EngineError::file(format!("Failed to write {}: {}", path.display(), e))
                })?;
                (FileOutcome::Fixed, Some(checksum(&fixed)))
            }
        }
        _ => (FileOutcome::Unchanged, Some(fingerprint)),
    };

    if ctx.use_cache
        && let Some(recorded) = recorded
    {
        cache.lock().set(&key, recorded);
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        key,
        outcome,
    })
}

/// Processes files one after another.
pub fn run_files<C, P>(
    paths: &[PathBuf],
    processor: &P,
    cache: &Mutex<C>,
    ctx: &FileContext<'_>,
) -> RunReport
where
    C: Cache,
    P: FileProcessor + ?Sized,
{
    let results = paths
        .iter()
        .map(|path| run_file(path, processor, cache, ctx).map_err(|e| (path.clone(), e)));
    collect_report(results)
}

pub(crate) fn collect_report(
    results: impl IntoIterator<Item = Result<FileReport, (PathBuf, EngineError)>>,
) -> RunReport {
    let mut report = RunReport::default();
    for result in results {
        match result {
            Ok(file) => report.files.push(file),
            Err((path, error)) => {
                warn!("Failed to process {}: {}", path.display(), error);
                report.failures.push((path, error));
            }
        }
    }
    report
}
