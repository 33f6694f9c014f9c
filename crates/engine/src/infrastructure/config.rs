//! Import configuration.
//!
//! The importer runs without arguments. Both paths have defaults and can be
//! overridden from the environment (or a `.env` file at the repo root).

use std::path::PathBuf;

/// Directory holding the `5e-SRD-*.json` documents.
pub const DATA_DIR_ENV: &str = "SRD_DATA_DIR";
/// Output store file.
pub const DB_PATH_ENV: &str = "SRD_DB_PATH";

const DEFAULT_DATA_DIR: &str = "data/modules";
const DEFAULT_DB_PATH: &str = "data/dnd_srd.db";

/// Where to read documents from and where to write the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl ImportConfig {
    pub fn new(data_dir: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            db_path: db_path.into(),
        }
    }

    /// Build from environment variables, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env_or(DATA_DIR_ENV, defaults.data_dir),
            db_path: env_or(DB_PATH_ENV, defaults.db_path),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR, DEFAULT_DB_PATH)
    }
}

fn env_or(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or(default)
}

/// Load `.env.local` / `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
