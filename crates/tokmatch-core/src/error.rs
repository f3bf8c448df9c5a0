//! Error types for tokmatch-core
//!
//! The search path itself never fails: unknown keywords, groups and patterns
//! simply produce no matches. These errors surface only from the fallible
//! builders and from configuration parsing.

use thiserror::Error;

/// A token sequence would grow past its fixed capacity.
///
/// Returned by [`TokenSequence::try_push`](crate::sequence::TokenSequence::try_push);
/// the sequence is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("token sequence capacity of {capacity} exceeded")]
pub struct CapacityError {
    pub capacity: usize,
}

/// Errors raised by tokmatch-core.
#[derive(Debug, Error)]
pub enum Error {
    /// A token sequence would exceed its capacity
    #[error("token sequence capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    /// Every token value below the sentinel has been assigned
    #[error("keyword token space exhausted")]
    TokenSpaceExhausted,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<CapacityError> for Error {
    fn from(err: CapacityError) -> Self {
        Error::CapacityExceeded {
            capacity: err.capacity,
        }
    }
}

/// Result type alias using the tokmatch-core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
