//! Domain error model.

use thiserror::Error;

use crate::id::PartId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// uniqueness, missing parts, forbidden stock movements). Storage failures
/// belong to the infrastructure layer.
///
/// Every failed mutation leaves state untouched, so callers can render the
/// message and let the user re-submit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty or out of range.
    #[error("validation failed: {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A part number is already taken by another part.
    #[error("duplicate part number: {0}")]
    DuplicateKey(String),

    /// The operation references a part that does not exist.
    #[error("part {0} not found")]
    NotFound(PartId),

    /// The operation is well-formed but not allowed in the current state
    /// (e.g. an issue larger than the stock on hand, an unknown direction).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn duplicate_key(part_number: impl Into<String>) -> Self {
        Self::DuplicateKey(part_number.into())
    }

    pub fn not_found(id: PartId) -> Self {
        Self::NotFound(id)
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation_error",
            DomainError::DuplicateKey(_) => "duplicate_key",
            DomainError::NotFound(_) => "not_found",
            DomainError::InvalidOperation(_) => "invalid_operation",
        }
    }
}
