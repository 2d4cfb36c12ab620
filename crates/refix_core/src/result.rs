//! Run results.

use std::path::PathBuf;

use crate::EngineError;

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Skipped: content matches the cached fingerprint.
    Cached,
    /// Processed; nothing needed fixing.
    Unchanged,
    /// Processed and rewritten.
    Fixed,
    /// Processed in dry-run mode; a fix was found but not written.
    WouldFix,
}

/// Result for a single file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path to the file.
    pub path: PathBuf,

    /// Cache key of the file.
    pub key: String,

    /// What happened.
    pub outcome: FileOutcome,
}

/// Result of a run over many files.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files that were processed or skipped.
    pub files: Vec<FileReport>,

    /// Files that failed, with their errors.
    pub failures: Vec<(PathBuf, EngineError)>,
}

impl RunReport {
    /// Number of files with the given outcome.
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// Number of files skipped thanks to the cache.
    pub fn cached(&self) -> usize {
        self.count(FileOutcome::Cached)
    }

    /// Number of files rewritten.
    pub fn fixed(&self) -> usize {
        self.count(FileOutcome::Fixed)
    }

    /// Returns the outcome recorded for `path`.
    pub fn outcome_of(&self, path: &std::path::Path) -> Option<FileOutcome> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.outcome)
    }

    /// Returns true if no file failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
