//! Classes and subclasses.
//!
//! Subclasses have two phases: the class step inserts a bare row for every
//! subclass a class lists, and the subclass-detail step later fills in the
//! descriptive columns of rows that already exist.

use sqlx::SqliteConnection;
use srdbldr_domain::{text_or_empty, ClassRecord, SubclassRecord};

use super::choices::{resolve_choices, ChoiceScope};
use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

pub async fn populate_classes(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Classes) else {
        tracing::warn!("Skipping class tables, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let classes: Vec<ClassRecord> = document.records("Class");
    for class in &classes {
        insert_class(conn, class).await?;
    }

    tracing::info!(records = classes.len(), "Class tables populated");
    Ok(StepOutcome::Populated {
        records: classes.len(),
    })
}

async fn insert_class(conn: &mut SqliteConnection, class: &ClassRecord) -> Result<(), ImportError> {
    sqlx::query(
        r#"INSERT OR IGNORE INTO Class
           ("index", name, hit_die, spellcasting_level, spellcasting_ability_index)
           VALUES (?, ?, ?, ?, ?)"#,
    )
    .bind(&class.index)
    .bind(&class.name)
    .bind(class.hit_die)
    .bind(class.spellcasting_level())
    .bind(class.spellcasting_ability())
    .execute(&mut *conn)
    .await
    .map_err(|e| ImportError::store(format!("insert Class '{}'", class.index), e))?;

    for subclass in &class.subclasses {
        sqlx::query(
            r#"INSERT OR IGNORE INTO Subclass ("index", name, class_index) VALUES (?, ?, ?)"#,
        )
        .bind(&subclass.index)
        .bind(subclass.display_name())
        .bind(&class.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!("insert Subclass '{}' of '{}'", subclass.index, class.index),
                e,
            )
        })?;
    }

    for proficiency in &class.proficiencies {
        sqlx::query(
            "INSERT OR IGNORE INTO ClassProficiency (class_index, proficiency_index) VALUES (?, ?)",
        )
        .bind(&class.index)
        .bind(&proficiency.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!(
                    "insert ClassProficiency '{}' for '{}'",
                    proficiency.index, class.index
                ),
                e,
            )
        })?;
    }

    for saving_throw in &class.saving_throws {
        sqlx::query(
            "INSERT OR IGNORE INTO ClassSavingThrow (class_index, ability_score_index) VALUES (?, ?)",
        )
        .bind(&class.index)
        .bind(&saving_throw.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!(
                    "insert ClassSavingThrow '{}' for '{}'",
                    saving_throw.index, class.index
                ),
                e,
            )
        })?;
    }

    resolve_choices(
        conn,
        ChoiceScope::ClassProficiency,
        &class.index,
        &class.proficiency_choices,
    )
    .await?;

    Ok(())
}

/// Fill descriptions of subclasses created by the class step. Never inserts.
pub async fn populate_subclass_details(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Subclasses) else {
        tracing::warn!("Skipping subclass details, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let subclasses: Vec<SubclassRecord> = document.records("Subclass");
    for subclass in &subclasses {
        let result = sqlx::query(
            r#"UPDATE Subclass SET description = ?, subclass_flavor = ? WHERE "index" = ?"#,
        )
        .bind(text_or_empty(subclass.desc.as_ref()))
        .bind(&subclass.subclass_flavor)
        .bind(&subclass.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| ImportError::store(format!("update Subclass '{}'", subclass.index), e))?;

        if result.rows_affected() == 0 {
            tracing::warn!(
                subclass = %subclass.index,
                "No class lists this subclass, details not stored"
            );
        }
    }

    tracing::info!(records = subclasses.len(), "Subclass details populated");
    Ok(StepOutcome::Populated {
        records: subclasses.len(),
    })
}
