//! Engine error types.

use thiserror::Error;

/// Errors that can occur while running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// The processor rejected a file.
    #[error("Processing error: {0}")]
    Process(#[from] crate::ProcessError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] refix_cache::CacheError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}
