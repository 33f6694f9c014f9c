//! Infrastructure implementations.
//!
//! Document loading, the SQLite store and configuration.

pub mod config;
pub mod error;
pub mod importers;
pub mod persistence;
