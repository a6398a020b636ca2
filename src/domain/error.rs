//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeKind;

/// Domain errors represent contract violations of the core structures.
/// None of them are recoverable; they propagate to the immediate caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unsupported operation: {operation} on {kind} node")]
    UnsupportedOperation {
        operation: &'static str,
        kind: NodeKind,
    },

    #[error("unsupported node kind: {evaluator} cannot visit {kind} nodes")]
    UnsupportedNodeKind { kind: NodeKind, evaluator: String },

    #[error("invalid cursor access at position {position}")]
    InvalidCursorAccess { position: isize },

    #[error("parse error at offset {position}: {message}")]
    Parse { position: usize, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
