//! SrdBldr importer - builds the rules store from the SRD documents.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use srdbldr_engine::infrastructure::config::{load_dotenv_from_repo_root, ImportConfig};
use srdbldr_engine::use_cases::pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the importer may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "srdbldr_engine=info,srdbldr_import=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ImportConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        db_path = %config.db_path.display(),
        "Starting SRD import"
    );

    let report = match pipeline::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "SRD import failed, no store written");
            return Err(e)
                .with_context(|| format!("importing into {}", config.db_path.display()));
        }
    };

    for step in report.skipped_steps() {
        tracing::warn!(step = step.name(), "Step skipped, its document was not loaded");
    }
    for count in &report.table_counts {
        tracing::info!(table = count.table, rows = count.rows, "Table populated");
    }
    tracing::info!(
        path = %report.db_path.display(),
        tables = report.table_counts.len(),
        rows = report.total_rows(),
        "SRD import complete"
    );

    Ok(())
}
