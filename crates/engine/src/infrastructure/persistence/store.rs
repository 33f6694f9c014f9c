//! The SQLite file written by an import run.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, SqliteConnection};

use crate::infrastructure::error::ImportError;

/// Single writer connection to a freshly created store file.
pub struct SrdStore {
    conn: SqliteConnection,
    path: PathBuf,
}

impl SrdStore {
    /// Create an empty store at `path`, removing any previous file first.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, ImportError> {
        let path = path.into();
        remove_store_file(&path).await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Delete)
            .connect()
            .await
            .map_err(|e| ImportError::store(format!("open store {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), "Store opened");
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Close the connection, flushing everything to disk.
    pub async fn close(self) -> Result<(), ImportError> {
        self.conn
            .close()
            .await
            .map_err(|e| ImportError::store("close store", e))
    }
}

/// Delete a store file if it exists.
pub async fn remove_store_file(path: &Path) -> Result<(), ImportError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed existing store file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
