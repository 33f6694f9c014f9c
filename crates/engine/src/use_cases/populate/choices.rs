//! Choice resolution.
//!
//! Flattens "choose N of ..." structures into one choice row per structure and
//! one option row per terminal reference. Options of a nested choice are
//! folded into the enclosing choice; the nested count and description are
//! dropped.

use serde_json::Value;
use sqlx::SqliteConnection;
use srdbldr_domain::{Choice, ChoiceList, ChoiceOption};

use crate::infrastructure::error::ImportError;

/// How many levels of nested choices are followed below a top-level choice.
pub const MAX_NESTED_DEPTH: usize = 1;

/// Owner and target of a family of choice tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceScope {
    ClassProficiency,
    RaceProficiency,
    RaceLanguage,
    SubraceProficiency,
    SubraceLanguage,
}

impl ChoiceScope {
    pub fn choice_table(&self) -> &'static str {
        match self {
            ChoiceScope::ClassProficiency => "ClassProficiencyChoice",
            ChoiceScope::RaceProficiency => "RaceProficiencyChoice",
            ChoiceScope::RaceLanguage => "RaceLanguageChoice",
            ChoiceScope::SubraceProficiency => "SubraceProficiencyChoice",
            ChoiceScope::SubraceLanguage => "SubraceLanguageChoice",
        }
    }

    pub fn option_table(&self) -> &'static str {
        match self {
            ChoiceScope::ClassProficiency => "ClassProficiencyChoiceOption",
            ChoiceScope::RaceProficiency => "RaceProficiencyChoiceOption",
            ChoiceScope::RaceLanguage => "RaceLanguageChoiceOption",
            ChoiceScope::SubraceProficiency => "SubraceProficiencyChoiceOption",
            ChoiceScope::SubraceLanguage => "SubraceLanguageChoiceOption",
        }
    }

    pub fn owner_column(&self) -> &'static str {
        match self {
            ChoiceScope::ClassProficiency => "class_index",
            ChoiceScope::RaceProficiency | ChoiceScope::RaceLanguage => "race_index",
            ChoiceScope::SubraceProficiency | ChoiceScope::SubraceLanguage => "subrace_index",
        }
    }

    pub fn target_column(&self) -> &'static str {
        match self {
            ChoiceScope::ClassProficiency
            | ChoiceScope::RaceProficiency
            | ChoiceScope::SubraceProficiency => "proficiency_index",
            ChoiceScope::RaceLanguage | ChoiceScope::SubraceLanguage => "language_index",
        }
    }
}

/// Tally of one `resolve_choices` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChoiceResolution {
    pub choices: usize,
    pub options: usize,
    pub skipped: usize,
}

/// Terminal reference indices reachable from `options`, in document order.
pub fn flatten_options(options: &[Value]) -> Vec<String> {
    let mut targets = Vec::new();
    collect_references(options, 0, &mut targets);
    targets
}

fn collect_references(options: &[Value], depth: usize, targets: &mut Vec<String>) {
    for option in options {
        match ChoiceOption::parse(option) {
            Ok(ChoiceOption::Reference { item }) => targets.push(item.index),
            Ok(ChoiceOption::Choice { choice }) => {
                if depth >= MAX_NESTED_DEPTH {
                    tracing::warn!(depth = depth + 1, "Nested choice too deep, skipping it");
                    continue;
                }
                collect_references(choice.options(), depth + 1, targets);
            }
            Ok(ChoiceOption::Other) => {}
            Err(e) => tracing::warn!(error = %e, "Skipping malformed choice option"),
        }
    }
}

/// Write every well-formed choice in `list` for `owner`.
///
/// Malformed entries are logged and counted in `skipped`; they never fail the
/// owner. Choice rows are always appended, never deduplicated.
pub async fn resolve_choices(
    conn: &mut SqliteConnection,
    scope: ChoiceScope,
    owner: &str,
    list: &ChoiceList,
) -> Result<ChoiceResolution, ImportError> {
    let mut resolution = ChoiceResolution::default();

    for (position, entry) in list.entries().iter().enumerate() {
        let choice = match Choice::parse(entry) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!(
                    table = scope.choice_table(),
                    owner,
                    position,
                    error = %e,
                    "Skipping choice"
                );
                resolution.skipped += 1;
                continue;
            }
        };

        let choice_id = insert_choice(conn, scope, owner, &choice).await?;
        resolution.choices += 1;

        let insert_option = format!(
            "INSERT OR IGNORE INTO {} (choice_id, {}) VALUES (?, ?)",
            scope.option_table(),
            scope.target_column()
        );
        for target in flatten_options(choice.options()) {
            let inserted = sqlx::query(&insert_option)
                .bind(choice_id)
                .bind(&target)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    ImportError::store(
                        format!("insert {} '{}' for {owner}", scope.option_table(), target),
                        e,
                    )
                })?;
            if inserted.rows_affected() == 1 {
                resolution.options += 1;
            }
        }
    }

    tracing::debug!(
        table = scope.choice_table(),
        owner,
        choices = resolution.choices,
        options = resolution.options,
        skipped = resolution.skipped,
        "Resolved choices"
    );
    Ok(resolution)
}

async fn insert_choice(
    conn: &mut SqliteConnection,
    scope: ChoiceScope,
    owner: &str,
    choice: &Choice,
) -> Result<i64, ImportError> {
    let sql = format!(
        "INSERT INTO {} ({}, description, choose, type) VALUES (?, ?, ?, ?)",
        scope.choice_table(),
        scope.owner_column()
    );
    let result = sqlx::query(&sql)
        .bind(owner)
        .bind(&choice.desc)
        .bind(i64::from(choice.choose))
        .bind(&choice.choice_type)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(format!("insert {} for {owner}", scope.choice_table()), e)
        })?;
    Ok(result.last_insert_rowid())
}
