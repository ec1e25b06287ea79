//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::VampireId;

/// Domain errors represent violations of the genealogy tree invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown vampire: {0}")]
    UnknownVampire(VampireId),

    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("cycle detected in genealogy at: {0}")]
    CycleDetected(VampireId),

    #[error("vampires {left} and {right} do not share an original vampire")]
    DisjointTrees { left: VampireId, right: VampireId },
}

/// Result type for genealogy operations.
pub type DomainResult<T> = Result<T, DomainError>;
