//! The seam to the fixing engine.

use std::path::Path;

use thiserror::Error;

/// Result of successfully processing one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processed {
    /// New file content, or `None` if nothing needed fixing.
    pub fixed: Option<Vec<u8>>,
}

impl Processed {
    /// The file is already clean.
    pub fn unchanged() -> Self {
        Self { fixed: None }
    }

    /// The file was fixed into `content`.
    pub fn fixed(content: impl Into<Vec<u8>>) -> Self {
        Self {
            fixed: Some(content.into()),
        }
    }
}

/// A processor failed on a file.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProcessError {
    message: String,
}

impl ProcessError {
    /// Creates a processing error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rewrites source files according to the active rules.
///
/// Implementations must be shareable across threads for parallel runs.
pub trait FileProcessor: Sync {
    /// Processes one file's content.
    fn process(&self, path: &Path, content: &[u8]) -> Result<Processed, ProcessError>;
}

impl<F> FileProcessor for F
where
    F: Fn(&Path, &[u8]) -> Result<Processed, ProcessError> + Sync,
{
    fn process(&self, path: &Path, content: &[u8]) -> Result<Processed, ProcessError> {
        self(path, content)
    }
}
