//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required collaborator or sentinel was not supplied at construction.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An index fell outside the range accepted by the operation.
    #[error("{what} index {index} is out of range (length {len})")]
    OutOfRange {
        /// What kind of index was rejected.
        what: &'static str,
        /// The rejected index.
        index: usize,
        /// The length the index was checked against.
        len: usize,
    },

    /// A lookup found nothing at the requested position.
    #[error("not found: {0}")]
    NotFound(String),

    /// A validation error in command input.
    #[error("validation error: {0}")]
    Validation(String),
}
