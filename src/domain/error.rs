//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::PersonId;

/// Domain errors represent violations of the tree model or the file format.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person id {id} out of range (tree has {size} people)")]
    IdOutOfRange { id: PersonId, size: usize },

    #[error("invalid family tree format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
