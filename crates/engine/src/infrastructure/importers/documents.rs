//! SRD document loader.
//!
//! Every source document is a JSON file holding a top-level array. The loader
//! only checks that shape; entries stay untyped until a populator decodes them
//! one at a time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use srdbldr_domain::{decode_record, json_kind};
use thiserror::Error;
use tokio::fs;

/// The named source documents, in the order they are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    AbilityScores,
    DamageTypes,
    MagicSchools,
    Proficiencies,
    EquipmentCategories,
    WeaponProperties,
    Languages,
    Classes,
    Subclasses,
    Spells,
    Equipment,
    Features,
    Levels,
    Races,
    Subraces,
    Feats,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 16] = [
        DocumentKind::AbilityScores,
        DocumentKind::DamageTypes,
        DocumentKind::MagicSchools,
        DocumentKind::Proficiencies,
        DocumentKind::EquipmentCategories,
        DocumentKind::WeaponProperties,
        DocumentKind::Languages,
        DocumentKind::Classes,
        DocumentKind::Subclasses,
        DocumentKind::Spells,
        DocumentKind::Equipment,
        DocumentKind::Features,
        DocumentKind::Levels,
        DocumentKind::Races,
        DocumentKind::Subraces,
        DocumentKind::Feats,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::AbilityScores => "5e-SRD-Ability-Scores.json",
            DocumentKind::DamageTypes => "5e-SRD-Damage-Types.json",
            DocumentKind::MagicSchools => "5e-SRD-Magic-Schools.json",
            DocumentKind::Proficiencies => "5e-SRD-Proficiencies.json",
            DocumentKind::EquipmentCategories => "5e-SRD-Equipment-Categories.json",
            DocumentKind::WeaponProperties => "5e-SRD-Weapon-Properties.json",
            DocumentKind::Languages => "5e-SRD-Languages.json",
            DocumentKind::Classes => "5e-SRD-Classes.json",
            DocumentKind::Subclasses => "5e-SRD-Subclasses.json",
            DocumentKind::Spells => "5e-SRD-Spells.json",
            DocumentKind::Equipment => "5e-SRD-Equipment.json",
            DocumentKind::Features => "5e-SRD-Features.json",
            DocumentKind::Levels => "5e-SRD-Levels.json",
            DocumentKind::Races => "5e-SRD-Races.json",
            DocumentKind::Subraces => "5e-SRD-Subraces.json",
            DocumentKind::Feats => "5e-SRD-Feats.json",
        }
    }

    /// Short name used in logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::AbilityScores => "ability-scores",
            DocumentKind::DamageTypes => "damage-types",
            DocumentKind::MagicSchools => "magic-schools",
            DocumentKind::Proficiencies => "proficiencies",
            DocumentKind::EquipmentCategories => "equipment-categories",
            DocumentKind::WeaponProperties => "weapon-properties",
            DocumentKind::Languages => "languages",
            DocumentKind::Classes => "classes",
            DocumentKind::Subclasses => "subclasses",
            DocumentKind::Spells => "spells",
            DocumentKind::Equipment => "equipment",
            DocumentKind::Features => "features",
            DocumentKind::Levels => "levels",
            DocumentKind::Races => "races",
            DocumentKind::Subraces => "subraces",
            DocumentKind::Feats => "feats",
        }
    }

    /// Documents the import cannot run without.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            DocumentKind::Classes | DocumentKind::Features | DocumentKind::Levels
        )
    }
}

/// Why a document could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a top-level array in {path}, found {found}")]
    NotAnArray { path: PathBuf, found: &'static str },
}

/// A loaded document: its kind plus the raw entries of the top-level array.
#[derive(Debug, Clone)]
pub struct Document {
    pub kind: DocumentKind,
    pub entries: Vec<Value>,
}

impl Document {
    pub fn new(kind: DocumentKind, entries: Vec<Value>) -> Self {
        Self { kind, entries }
    }

    /// Decode every entry, logging and skipping the ones that do not fit `T`.
    pub fn records<T: DeserializeOwned>(&self, entity_type: &'static str) -> Vec<T> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| match decode_record::<T>(entity_type, entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        document = self.kind.label(),
                        position,
                        error = %e,
                        "Skipping malformed record"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads documents out of a data directory.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    data_dir: PathBuf,
}

impl DocumentLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Read and parse one document.
    pub async fn read(&self, kind: DocumentKind) -> Result<Document, LoadError> {
        let path = self.path_for(kind);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(path))
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };

        let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.clone(),
            source,
        })?;

        match value {
            Value::Array(entries) => Ok(Document::new(kind, entries)),
            other => Err(LoadError::NotAnArray {
                path,
                found: json_kind(&other),
            }),
        }
    }

    /// Load one document, logging a warning and returning `None` on any failure.
    pub async fn load(&self, kind: DocumentKind) -> Option<Document> {
        match self.read(kind).await {
            Ok(document) => {
                tracing::debug!(
                    document = kind.label(),
                    entries = document.len(),
                    "Loaded document"
                );
                Some(document)
            }
            Err(e) => {
                tracing::warn!(document = kind.label(), error = %e, "Could not load document");
                None
            }
        }
    }
}

/// Every document of one import run, loaded up front.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    documents: HashMap<DocumentKind, Document>,
}

impl DocumentSet {
    pub async fn load_all(loader: &DocumentLoader) -> Self {
        let mut set = Self::default();
        for kind in DocumentKind::ALL {
            if let Some(document) = loader.load(kind).await {
                set.insert(document);
            }
        }
        set
    }

    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.kind, document);
    }

    pub fn get(&self, kind: DocumentKind) -> Option<&Document> {
        self.documents.get(&kind)
    }

    /// First required document that is absent, if any.
    pub fn missing_required(&self) -> Option<DocumentKind> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.is_required() && !self.documents.contains_key(kind))
    }
}
