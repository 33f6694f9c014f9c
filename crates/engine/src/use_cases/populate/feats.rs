//! Feats. Prerequisites are kept as an opaque JSON list.

use sqlx::SqliteConnection;
use srdbldr_domain::{text_or_empty, FeatRecord};

use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

pub async fn populate_feats(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Feats) else {
        tracing::warn!("Skipping feats, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let feats: Vec<FeatRecord> = document.records("Feat");
    for feat in &feats {
        sqlx::query(
            r#"INSERT OR IGNORE INTO Feat ("index", name, prerequisites_json, description)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&feat.index)
        .bind(&feat.name)
        .bind(feat.prerequisites_json())
        .bind(text_or_empty(feat.desc.as_ref()))
        .execute(&mut *conn)
        .await
        .map_err(|e| ImportError::store(format!("insert Feat '{}'", feat.index), e))?;
    }

    tracing::info!(records = feats.len(), "Feat table populated");
    Ok(StepOutcome::Populated {
        records: feats.len(),
    })
}
