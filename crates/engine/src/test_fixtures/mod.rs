//! Test fixtures: document directories, scratch stores and a small but
//! coherent SRD document set.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{srd, DocumentDir};
//!
//! let docs = DocumentDir::with_documents(srd::documents());
//! let report = run(&docs.config()).await?;
//! ```

pub mod srd;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use tempfile::TempDir;

use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::importers::{DocumentKind, DocumentLoader, DocumentSet};
use crate::infrastructure::persistence::{create_schema, quote_ident, table_names};

// =============================================================================
// Document directories
// =============================================================================

/// A temporary data directory holding SRD documents.
pub struct DocumentDir {
    dir: TempDir,
}

impl DocumentDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn with_documents(documents: impl IntoIterator<Item = (DocumentKind, Value)>) -> Self {
        let dir = Self::new();
        for (kind, value) in documents {
            dir.write(kind, &value);
        }
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, kind: DocumentKind, value: &Value) {
        let content = serde_json::to_string_pretty(value).expect("serialize document");
        self.write_raw(kind, &content);
    }

    pub fn write_raw(&self, kind: DocumentKind, content: &str) {
        std::fs::write(self.path().join(kind.file_name()), content).expect("write document");
    }

    pub fn remove(&self, kind: DocumentKind) {
        std::fs::remove_file(self.path().join(kind.file_name())).expect("remove document");
    }

    pub async fn document_set(&self) -> DocumentSet {
        DocumentSet::load_all(&DocumentLoader::new(self.path())).await
    }

    /// Store path inside this directory, in a subdirectory that does not exist yet.
    pub fn db_path(&self, name: &str) -> PathBuf {
        self.path().join("out").join(name)
    }

    pub fn config(&self) -> ImportConfig {
        ImportConfig::new(self.path(), self.db_path("srd.db"))
    }
}

impl Default for DocumentDir {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Stores
// =============================================================================

/// In-memory connection with the full schema and foreign keys enforced.
pub async fn memory_store() -> SqliteConnection {
    let mut conn = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("in-memory options")
        .foreign_keys(true)
        .connect()
        .await
        .expect("open in-memory store");
    create_schema(&mut conn).await.expect("create schema");
    conn
}

pub async fn open_store(path: &Path) -> SqliteConnection {
    SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .connect()
        .await
        .expect("open store")
}

pub async fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)))
        .fetch_one(conn)
        .await
        .expect("count rows")
}

/// Every row of every table, rendered as SQL literals and sorted.
pub async fn dump_tables(path: &Path) -> BTreeMap<String, Vec<String>> {
    let mut conn = open_store(path).await;
    let mut dump = BTreeMap::new();

    for table in table_names() {
        let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(&mut conn)
            .await
            .expect("table columns");
        let rendered = columns
            .iter()
            .map(|c| format!("quote({})", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(" || '|' || ");

        let mut rows: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT {rendered} FROM {}",
            quote_ident(table)
        ))
        .fetch_all(&mut conn)
        .await
        .expect("dump rows");
        rows.sort();
        dump.insert(table.to_string(), rows);
    }

    conn.close().await.expect("close");
    dump
}
