//! Unified import error types.
//!
//! Only fatal conditions are errors. Missing optional documents and malformed
//! records are logged where they occur and never reach this type.

use std::path::PathBuf;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// A failure that aborts the import and rolls the store back.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A store operation failed. `intent` names what the statement was for.
    #[error("Store error while trying to {intent}: {source}")]
    Store {
        intent: String,
        #[source]
        source: sqlx::Error,
    },

    /// A document that later steps depend on could not be loaded.
    #[error("Required document {document} could not be loaded from {}", path.display())]
    MissingPrerequisite {
        document: &'static str,
        path: PathBuf,
    },

    /// Generic I/O error (removing a stale store file, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An opaque JSON payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImportError {
    /// Create a store error for the statement described by `intent`.
    pub fn store(intent: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Store {
            intent: intent.into(),
            source,
        }
    }

    /// Check if this is a uniqueness, foreign-key, not-null or check violation.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Store {
                source: sqlx::Error::Database(db),
                ..
            } => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        }
    }

    /// The statement intent, if this is a store error.
    pub fn intent(&self) -> Option<&str> {
        match self {
            Self::Store { intent, .. } => Some(intent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_names_intent() {
        let err = ImportError::store("insert Class 'wizard'", sqlx::Error::RowNotFound);
        assert_eq!(err.intent(), Some("insert Class 'wizard'"));
        assert!(err
            .to_string()
            .starts_with("Store error while trying to insert Class 'wizard'"));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn missing_prerequisite_names_document() {
        let err = ImportError::MissingPrerequisite {
            document: "classes",
            path: PathBuf::from("/data/5e-SRD-Classes.json"),
        };
        assert_eq!(
            err.to_string(),
            "Required document classes could not be loaded from /data/5e-SRD-Classes.json"
        );
        assert_eq!(err.intent(), None);
    }
}
