//! SrdBldr Engine library.
//!
//! Turns the SRD JSON documents into a relational SQLite store.
//!
//! ## Structure
//!
//! - `infrastructure/` - Document loading, the SQLite store, configuration
//! - `use_cases/` - The import pipeline and its populators

pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use infrastructure::config::ImportConfig;
pub use infrastructure::error::ImportError;
pub use use_cases::pipeline::{run, ImportReport};
