//! Import pipeline.
//!
//! Loads every document, checks the hard prerequisites, then builds a fresh
//! store in one transaction: schema first, then each populator in dependency
//! order. Any store error rolls the transaction back and deletes the file, so
//! a store on disk is always complete.

use std::path::{Path, PathBuf};

use sqlx::{Connection, SqliteConnection};

use super::populate::{
    populate_classes, populate_equipment, populate_feats, populate_features_and_levels,
    populate_races, populate_reference, populate_spells, populate_subclass_details,
    populate_subraces, StepOutcome,
};
use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentLoader, DocumentSet};
use crate::infrastructure::persistence::{
    create_schema, remove_store_file, Catalog, SrdStore, TableCount,
};

/// The populators, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Reference,
    Classes,
    SubclassDetails,
    Spells,
    Equipment,
    FeaturesAndLevels,
    Races,
    Subraces,
    Feats,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 9] = [
        PipelineStep::Reference,
        PipelineStep::Classes,
        PipelineStep::SubclassDetails,
        PipelineStep::Spells,
        PipelineStep::Equipment,
        PipelineStep::FeaturesAndLevels,
        PipelineStep::Races,
        PipelineStep::Subraces,
        PipelineStep::Feats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PipelineStep::Reference => "reference",
            PipelineStep::Classes => "classes",
            PipelineStep::SubclassDetails => "subclass-details",
            PipelineStep::Spells => "spells",
            PipelineStep::Equipment => "equipment",
            PipelineStep::FeaturesAndLevels => "features-and-levels",
            PipelineStep::Races => "races",
            PipelineStep::Subraces => "subraces",
            PipelineStep::Feats => "feats",
        }
    }

    async fn run(
        &self,
        conn: &mut SqliteConnection,
        documents: &DocumentSet,
    ) -> Result<StepOutcome, ImportError> {
        match self {
            PipelineStep::Reference => populate_reference(conn, documents).await,
            PipelineStep::Classes => populate_classes(conn, documents).await,
            PipelineStep::SubclassDetails => populate_subclass_details(conn, documents).await,
            PipelineStep::Spells => populate_spells(conn, documents).await,
            PipelineStep::Equipment => populate_equipment(conn, documents).await,
            PipelineStep::FeaturesAndLevels => populate_features_and_levels(conn, documents).await,
            PipelineStep::Races => populate_races(conn, documents).await,
            PipelineStep::Subraces => populate_subraces(conn, documents).await,
            PipelineStep::Feats => populate_feats(conn, documents).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub step: PipelineStep,
    pub outcome: StepOutcome,
}

/// Summary of a successful import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub db_path: PathBuf,
    pub steps: Vec<StepReport>,
    pub table_counts: Vec<TableCount>,
}

impl ImportReport {
    pub fn skipped_steps(&self) -> impl Iterator<Item = PipelineStep> + '_ {
        self.steps
            .iter()
            .filter(|s| s.outcome.is_skipped())
            .map(|s| s.step)
    }

    pub fn total_rows(&self) -> i64 {
        self.table_counts.iter().map(|c| c.rows).sum()
    }
}

/// Run a full import as configured.
///
/// Any store already at the configured path is removed, on success and failure alike.
pub async fn run(config: &ImportConfig) -> Result<ImportReport, ImportError> {
    let loader = DocumentLoader::new(&config.data_dir);
    tracing::info!(data_dir = %loader.data_dir().display(), "Loading documents");
    let documents = DocumentSet::load_all(&loader).await;

    if let Some(kind) = documents.missing_required() {
        discard_store_file(&config.db_path).await;
        return Err(ImportError::MissingPrerequisite {
            document: kind.label(),
            path: loader.path_for(kind),
        });
    }

    let steps = build_store(&documents, &config.db_path).await?;

    let mut catalog = Catalog::open(&config.db_path).await?;
    let table_counts = catalog.table_counts().await?;
    catalog.close().await?;

    Ok(ImportReport {
        db_path: config.db_path.clone(),
        steps,
        table_counts,
    })
}

/// Write `documents` into a new store at `db_path`.
///
/// On failure nothing is left at `db_path`.
pub async fn build_store(
    documents: &DocumentSet,
    db_path: &Path,
) -> Result<Vec<StepReport>, ImportError> {
    let mut store = match SrdStore::create(db_path).await {
        Ok(store) => store,
        Err(e) => {
            discard_store_file(db_path).await;
            return Err(e);
        }
    };

    match populate_store(store.connection(), documents).await {
        Ok(steps) => {
            store.close().await?;
            tracing::info!(path = %db_path.display(), "Store written");
            Ok(steps)
        }
        Err(e) => {
            if let Err(close_err) = store.close().await {
                tracing::warn!(error = %close_err, "Failed to close store after error");
            }
            discard_store_file(db_path).await;
            Err(e)
        }
    }
}

async fn populate_store(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<Vec<StepReport>, ImportError> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| ImportError::store("begin import transaction", e))?;

    match run_steps(&mut tx, documents).await {
        Ok(steps) => {
            tx.commit()
                .await
                .map_err(|e| ImportError::store("commit import transaction", e))?;
            Ok(steps)
        }
        Err(e) => {
            tracing::error!(error = %e, "Import failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}

async fn run_steps(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<Vec<StepReport>, ImportError> {
    create_schema(conn).await?;

    let mut reports = Vec::with_capacity(PipelineStep::ALL.len());
    for step in PipelineStep::ALL {
        let outcome = step.run(conn, documents).await?;
        tracing::debug!(step = step.name(), records = outcome.records(), "Step finished");
        reports.push(StepReport { step, outcome });
    }
    Ok(reports)
}

async fn discard_store_file(path: &Path) {
    if let Err(e) = remove_store_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove store file");
    }
}
