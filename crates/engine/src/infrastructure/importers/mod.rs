//! Source document importers.
//!
//! Loads the SRD JSON documents from a data directory.

mod documents;

pub use documents::{Document, DocumentKind, DocumentLoader, DocumentSet, LoadError};
