//! Unified error types for the domain layer
//!
//! Decoding a single record out of a source document is the only fallible
//! operation in this crate. Errors here are always local to one record (or one
//! choice entry inside a record); callers log them and move on.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A document entry does not have the shape its record type expects
    #[error("Malformed {entity_type} record: {reason}")]
    MalformedRecord {
        entity_type: &'static str,
        reason: String,
    },

    /// A choice structure is well-formed JSON but violates a choice rule
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),
}

impl DomainError {
    /// Create a malformed record error
    pub fn malformed(entity_type: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            entity_type,
            reason: reason.into(),
        }
    }

    /// Create an invalid choice error
    pub fn invalid_choice(msg: impl Into<String>) -> Self {
        Self::InvalidChoice(msg.into())
    }
}
