//! Features and the class/subclass level progression.
//!
//! A feature can be created two ways: as a full record from the features
//! document, or as a bare stub (name only) by anything that references it.
//! Whichever comes first, the other never fails and never duplicates; a full
//! record fills in a stub that has no description yet.

use serde_json::Value;
use sqlx::SqliteConnection;
use srdbldr_domain::{
    text_or_empty, FeatureRecord, LevelOwner, LevelRecord, SpellcastingProgression,
};

use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

/// Insert a full feature, or enrich an existing stub.
pub async fn upsert_feature(
    conn: &mut SqliteConnection,
    feature: &FeatureRecord,
) -> Result<(), ImportError> {
    sqlx::query(
        r#"INSERT INTO Feature ("index", name, description) VALUES (?, ?, ?)
           ON CONFLICT("index") DO UPDATE SET
               name = excluded.name,
               description = excluded.description
           WHERE Feature.description IS NULL"#,
    )
    .bind(&feature.index)
    .bind(&feature.name)
    .bind(text_or_empty(feature.desc.as_ref()))
    .execute(&mut *conn)
    .await
    .map_err(|e| ImportError::store(format!("upsert Feature '{}'", feature.index), e))?;
    Ok(())
}

/// Make sure a feature row exists, creating a stub without description.
pub async fn ensure_feature_stub(
    conn: &mut SqliteConnection,
    index: &str,
    name: &str,
) -> Result<(), ImportError> {
    sqlx::query(r#"INSERT OR IGNORE INTO Feature ("index", name) VALUES (?, ?)"#)
        .bind(index)
        .bind(name)
        .execute(&mut *conn)
        .await
        .map_err(|e| ImportError::store(format!("insert Feature stub '{index}'"), e))?;
    Ok(())
}

pub async fn populate_features_and_levels(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let mut records = 0;
    let mut loaded_any = false;

    match documents.get(DocumentKind::Features) {
        Some(document) => {
            loaded_any = true;
            let features: Vec<FeatureRecord> = document.records("Feature");
            for feature in &features {
                upsert_feature(conn, feature).await?;
            }
            tracing::info!(records = features.len(), "Feature table populated");
            records += features.len();
        }
        None => tracing::warn!("Skipping Feature table, document not loaded"),
    }

    match documents.get(DocumentKind::Levels) {
        Some(document) => {
            loaded_any = true;
            let levels: Vec<LevelRecord> = document.records("Level");
            for level in &levels {
                insert_level(conn, level).await?;
            }
            tracing::info!(records = levels.len(), "Level progression populated");
            records += levels.len();
        }
        None => tracing::warn!("Skipping level progression, document not loaded"),
    }

    if !loaded_any {
        return Ok(StepOutcome::Skipped);
    }
    Ok(StepOutcome::Populated { records })
}

async fn insert_level(conn: &mut SqliteConnection, level: &LevelRecord) -> Result<(), ImportError> {
    let Some(owner) = level.owner() else {
        tracing::warn!(
            index = level.index.as_deref().unwrap_or("?"),
            "Level entry has neither class nor subclass, skipping"
        );
        return Ok(());
    };

    for feature in &level.features {
        ensure_feature_stub(conn, &feature.index, feature.display_name()).await?;
    }

    match owner {
        LevelOwner::Subclass(subclass) => {
            let blob = json_blob(level.subclass_specific.as_ref())?;
            sqlx::query(
                r#"INSERT OR IGNORE INTO SubclassLevel
                   ("index", subclass_index, level, subclass_specific_json)
                   VALUES (?, ?, ?, ?)"#,
            )
            .bind(&level.index)
            .bind(&subclass.index)
            .bind(level.level)
            .bind(blob)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(
                    format!("insert SubclassLevel {} of '{}'", level.level, subclass.index),
                    e,
                )
            })?;

            let id: i64 = sqlx::query_scalar(
                "SELECT id FROM SubclassLevel WHERE subclass_index = ? AND level = ?",
            )
            .bind(&subclass.index)
            .bind(level.level)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(
                    format!("look up SubclassLevel {} of '{}'", level.level, subclass.index),
                    e,
                )
            })?;

            for feature in &level.features {
                sqlx::query(
                    "INSERT OR IGNORE INTO SubclassLevel_Feature (subclass_level_id, feature_index) VALUES (?, ?)",
                )
                .bind(id)
                .bind(&feature.index)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    ImportError::store(
                        format!("link Feature '{}' to SubclassLevel {id}", feature.index),
                        e,
                    )
                })?;
            }
        }
        LevelOwner::Class(class) => {
            let blob = json_blob(level.class_specific.as_ref())?;
            sqlx::query(
                r#"INSERT OR IGNORE INTO ClassLevel
                   ("index", class_index, level, prof_bonus, ability_score_bonuses, class_specific_json)
                   VALUES (?, ?, ?, ?, ?, ?)"#,
            )
            .bind(&level.index)
            .bind(&class.index)
            .bind(level.level)
            .bind(level.prof_bonus)
            .bind(level.ability_score_bonuses)
            .bind(blob)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(
                    format!("insert ClassLevel {} of '{}'", level.level, class.index),
                    e,
                )
            })?;

            let id: i64 =
                sqlx::query_scalar("SELECT id FROM ClassLevel WHERE class_index = ? AND level = ?")
                    .bind(&class.index)
                    .bind(level.level)
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(|e| {
                        ImportError::store(
                            format!("look up ClassLevel {} of '{}'", level.level, class.index),
                            e,
                        )
                    })?;

            for feature in &level.features {
                sqlx::query(
                    "INSERT OR IGNORE INTO ClassLevel_Feature (class_level_id, feature_index) VALUES (?, ?)",
                )
                .bind(id)
                .bind(&feature.index)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    ImportError::store(
                        format!("link Feature '{}' to ClassLevel {id}", feature.index),
                        e,
                    )
                })?;
            }

            if let Some(spellcasting) = &level.spellcasting {
                insert_spellcasting(conn, id, spellcasting).await?;
            }
        }
    }

    Ok(())
}

async fn insert_spellcasting(
    conn: &mut SqliteConnection,
    class_level_id: i64,
    progression: &SpellcastingProgression,
) -> Result<(), ImportError> {
    let [s1, s2, s3, s4, s5, s6, s7, s8, s9] = progression.spell_slots();
    sqlx::query(
        r#"INSERT OR IGNORE INTO ClassLevel_Spellcasting
           (class_level_id, cantrips_known, spells_known,
            spell_slots_level_1, spell_slots_level_2, spell_slots_level_3,
            spell_slots_level_4, spell_slots_level_5, spell_slots_level_6,
            spell_slots_level_7, spell_slots_level_8, spell_slots_level_9)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(class_level_id)
    .bind(progression.cantrips_known)
    .bind(progression.spells_known)
    .bind(s1)
    .bind(s2)
    .bind(s3)
    .bind(s4)
    .bind(s5)
    .bind(s6)
    .bind(s7)
    .bind(s8)
    .bind(s9)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        ImportError::store(
            format!("insert ClassLevel_Spellcasting for ClassLevel {class_level_id}"),
            e,
        )
    })?;
    Ok(())
}

/// Opaque payloads are stored as JSON text; absent or null stays NULL.
fn json_blob(value: Option<&Value>) -> Result<Option<String>, ImportError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::to_string(value)?)),
    }
}
