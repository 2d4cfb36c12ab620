//! Shared helpers for unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use refix_cache::{FileCache, RuleSignature};
use serde_json::json;
use tempfile::TempDir;

use crate::{FileProcessor, ProcessError, Processed, RUNTIME_VERSION};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Clean,
    TrimTrailingWhitespace,
    Fail,
}

/// Processor that counts its calls.
#[derive(Debug)]
pub struct RecordingProcessor {
    mode: Mode,
    calls: AtomicUsize,
}

impl RecordingProcessor {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reports every file as already clean.
    pub fn clean() -> Self {
        Self::with_mode(Mode::Clean)
    }

    /// Strips trailing spaces from every line.
    pub fn trim_trailing_whitespace() -> Self {
        Self::with_mode(Mode::TrimTrailingWhitespace)
    }

    /// Fails on every file.
    pub fn failing() -> Self {
        Self::with_mode(Mode::Fail)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FileProcessor for RecordingProcessor {
    fn process(&self, path: &Path, content: &[u8]) -> Result<Processed, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Mode::Clean => Ok(Processed::unchanged()),
            Mode::TrimTrailingWhitespace => {
                let text = String::from_utf8_lossy(content);
                let fixed: String = text
                    .split_inclusive('\n')
                    .map(|line| match line.strip_suffix('\n') {
                        Some(body) => format!("{}\n", body.trim_end_matches(' ')),
                        None => line.trim_end_matches(' ').to_string(),
                    })
                    .collect();
                if fixed.as_bytes() == content {
                    Ok(Processed::unchanged())
                } else {
                    Ok(Processed::fixed(fixed))
                }
            }
            Mode::Fail => Err(ProcessError::new(format!(
                "cannot parse {}",
                path.display()
            ))),
        }
    }
}

pub fn scenario_rules() -> RuleSignature {
    RuleSignature::from_value(json!({"A": true})).unwrap()
}

pub fn scenario_cache() -> FileCache {
    FileCache::new(RUNTIME_VERSION, false, scenario_rules())
}

pub fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
