//! The seven closed reference vocabularies.

use sqlx::SqliteConnection;
use srdbldr_domain::{text_or_empty, VocabularyEntry};

use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

/// A lookup table filled straight from one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    AbilityScores,
    DamageTypes,
    MagicSchools,
    Proficiencies,
    EquipmentCategories,
    WeaponProperties,
    Languages,
}

impl Vocabulary {
    pub const ALL: [Vocabulary; 7] = [
        Vocabulary::AbilityScores,
        Vocabulary::DamageTypes,
        Vocabulary::MagicSchools,
        Vocabulary::Proficiencies,
        Vocabulary::EquipmentCategories,
        Vocabulary::WeaponProperties,
        Vocabulary::Languages,
    ];

    pub fn document(&self) -> DocumentKind {
        match self {
            Vocabulary::AbilityScores => DocumentKind::AbilityScores,
            Vocabulary::DamageTypes => DocumentKind::DamageTypes,
            Vocabulary::MagicSchools => DocumentKind::MagicSchools,
            Vocabulary::Proficiencies => DocumentKind::Proficiencies,
            Vocabulary::EquipmentCategories => DocumentKind::EquipmentCategories,
            Vocabulary::WeaponProperties => DocumentKind::WeaponProperties,
            Vocabulary::Languages => DocumentKind::Languages,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Vocabulary::AbilityScores => "AbilityScore",
            Vocabulary::DamageTypes => "DamageType",
            Vocabulary::MagicSchools => "MagicSchool",
            Vocabulary::Proficiencies => "Proficiency",
            Vocabulary::EquipmentCategories => "EquipmentCategory",
            Vocabulary::WeaponProperties => "WeaponProperty",
            Vocabulary::Languages => "Language",
        }
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        entry: &VocabularyEntry,
    ) -> Result<(), ImportError> {
        let description = text_or_empty(entry.desc.as_ref());
        let query = match self {
            Vocabulary::AbilityScores => sqlx::query(
                r#"INSERT OR IGNORE INTO AbilityScore ("index", name, full_name, description)
                   VALUES (?, ?, ?, ?)"#,
            )
            .bind(&entry.index)
            .bind(&entry.name)
            .bind(&entry.full_name)
            .bind(description),
            Vocabulary::DamageTypes | Vocabulary::MagicSchools | Vocabulary::WeaponProperties => {
                sqlx::query(match self {
                    Vocabulary::DamageTypes => {
                        r#"INSERT OR IGNORE INTO DamageType ("index", name, description) VALUES (?, ?, ?)"#
                    }
                    Vocabulary::MagicSchools => {
                        r#"INSERT OR IGNORE INTO MagicSchool ("index", name, description) VALUES (?, ?, ?)"#
                    }
                    _ => {
                        r#"INSERT OR IGNORE INTO WeaponProperty ("index", name, description) VALUES (?, ?, ?)"#
                    }
                })
                .bind(&entry.index)
                .bind(&entry.name)
                .bind(description)
            }
            Vocabulary::Proficiencies => sqlx::query(
                r#"INSERT OR IGNORE INTO Proficiency ("index", name, type) VALUES (?, ?, ?)"#,
            )
            .bind(&entry.index)
            .bind(&entry.name)
            .bind(&entry.entry_type),
            Vocabulary::EquipmentCategories => sqlx::query(
                r#"INSERT OR IGNORE INTO EquipmentCategory ("index", name) VALUES (?, ?)"#,
            )
            .bind(&entry.index)
            .bind(&entry.name),
            Vocabulary::Languages => {
                let speakers =
                    (!entry.typical_speakers.is_empty()).then(|| entry.typical_speakers.join(", "));
                sqlx::query(
                    r#"INSERT OR IGNORE INTO Language
                       ("index", name, type, script, typical_speakers, description)
                       VALUES (?, ?, ?, ?, ?, ?)"#,
                )
                .bind(&entry.index)
                .bind(&entry.name)
                .bind(&entry.entry_type)
                .bind(&entry.script)
                .bind(speakers)
                .bind(description)
            }
        };

        query
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(format!("insert {} '{}'", self.table(), entry.index), e)
            })?;
        Ok(())
    }
}

/// Load every vocabulary present in `documents`.
pub async fn populate_reference(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let mut records = 0;
    let mut loaded_any = false;

    for vocabulary in Vocabulary::ALL {
        let Some(document) = documents.get(vocabulary.document()) else {
            tracing::warn!(
                table = vocabulary.table(),
                "Skipping vocabulary, document not loaded"
            );
            continue;
        };
        loaded_any = true;

        let entries: Vec<VocabularyEntry> = document.records(vocabulary.table());
        for entry in &entries {
            vocabulary.insert(conn, entry).await?;
        }
        tracing::debug!(
            table = vocabulary.table(),
            entries = entries.len(),
            "Vocabulary populated"
        );
        records += entries.len();
    }

    if !loaded_any {
        return Ok(StepOutcome::Skipped);
    }
    tracing::info!(records, "Reference tables populated");
    Ok(StepOutcome::Populated { records })
}
