//! Spells and their class/subclass lists.

use sqlx::SqliteConnection;
use srdbldr_domain::{text_or_empty, SpellRecord};

use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

pub async fn populate_spells(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Spells) else {
        tracing::warn!("Skipping spells, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let spells: Vec<SpellRecord> = document.records("Spell");
    for spell in &spells {
        insert_spell(conn, spell).await?;
    }

    tracing::info!(records = spells.len(), "Spell tables populated");
    Ok(StepOutcome::Populated {
        records: spells.len(),
    })
}

async fn insert_spell(conn: &mut SqliteConnection, spell: &SpellRecord) -> Result<(), ImportError> {
    let area = spell.area_of_effect.as_ref();

    // damage_type_index, dc_type_index and school_index are stored as given.
    sqlx::query(
        r#"INSERT OR IGNORE INTO Spell
           ("index", name, description, higher_level_desc, "range", components, material,
            ritual, duration, concentration, casting_time, level, attack_type,
            damage_type_index, dc_type_index, dc_success, area_of_effect_type,
            area_of_effect_size, school_index)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&spell.index)
    .bind(&spell.name)
    .bind(text_or_empty(spell.desc.as_ref()))
    .bind(text_or_empty(spell.higher_level.as_ref()))
    .bind(&spell.range)
    .bind(spell.components_text())
    .bind(&spell.material)
    .bind(spell.ritual)
    .bind(&spell.duration)
    .bind(spell.concentration)
    .bind(&spell.casting_time)
    .bind(spell.level)
    .bind(&spell.attack_type)
    .bind(spell.damage_type())
    .bind(spell.dc_type())
    .bind(spell.dc_success())
    .bind(area.and_then(|a| a.shape.as_deref()))
    .bind(area.and_then(|a| a.size))
    .bind(spell.school())
    .execute(&mut *conn)
    .await
    .map_err(|e| ImportError::store(format!("insert Spell '{}'", spell.index), e))?;

    for class in &spell.classes {
        sqlx::query("INSERT OR IGNORE INTO SpellClass (spell_index, class_index) VALUES (?, ?)")
            .bind(&spell.index)
            .bind(&class.index)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(
                    format!("insert SpellClass '{}' for '{}'", class.index, spell.index),
                    e,
                )
            })?;
    }

    for subclass in &spell.subclasses {
        sqlx::query(
            "INSERT OR IGNORE INTO SpellSubclass (spell_index, subclass_index) VALUES (?, ?)",
        )
        .bind(&spell.index)
        .bind(&subclass.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!(
                    "insert SpellSubclass '{}' for '{}'",
                    subclass.index, spell.index
                ),
                e,
            )
        })?;
    }

    Ok(())
}
