//! Error types for the tokmatch command line.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine or configuration error
    #[error(transparent)]
    Core(#[from] tokmatch_core::Error),

    /// Malformed line in a pattern file
    #[error("pattern file line {line}: {message}")]
    Pattern { line: usize, message: String },
}

/// Result type alias using the CLI [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
