//! Races and subraces.
//!
//! Both own the same families of dependent rows (ability bonuses,
//! proficiencies, languages, traits and choices), written by one helper that
//! is parameterised by [`Lineage`].

use sqlx::SqliteConnection;
use srdbldr_domain::{
    text_or_empty, AbilityBonus, ApiReference, ChoiceList, RaceRecord, SubraceRecord,
};

use super::choices::{resolve_choices, ChoiceScope};
use super::features::ensure_feature_stub;
use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lineage {
    Race,
    Subrace,
}

impl Lineage {
    fn prefix(&self) -> &'static str {
        match self {
            Lineage::Race => "Race",
            Lineage::Subrace => "Subrace",
        }
    }

    fn owner_column(&self) -> &'static str {
        match self {
            Lineage::Race => "race_index",
            Lineage::Subrace => "subrace_index",
        }
    }

    fn proficiency_scope(&self) -> ChoiceScope {
        match self {
            Lineage::Race => ChoiceScope::RaceProficiency,
            Lineage::Subrace => ChoiceScope::SubraceProficiency,
        }
    }

    fn language_scope(&self) -> ChoiceScope {
        match self {
            Lineage::Race => ChoiceScope::RaceLanguage,
            Lineage::Subrace => ChoiceScope::SubraceLanguage,
        }
    }
}

/// Rows hanging off a race or subrace.
struct Dependents<'a> {
    ability_bonuses: &'a [AbilityBonus],
    proficiencies: &'a [ApiReference],
    languages: &'a [ApiReference],
    traits: &'a [ApiReference],
    proficiency_options: &'a ChoiceList,
    language_options: &'a ChoiceList,
}

impl<'a> From<&'a RaceRecord> for Dependents<'a> {
    fn from(race: &'a RaceRecord) -> Self {
        Self {
            ability_bonuses: &race.ability_bonuses,
            proficiencies: &race.starting_proficiencies,
            languages: &race.languages,
            traits: &race.traits,
            proficiency_options: &race.starting_proficiency_options,
            language_options: &race.language_options,
        }
    }
}

impl<'a> From<&'a SubraceRecord> for Dependents<'a> {
    fn from(subrace: &'a SubraceRecord) -> Self {
        Self {
            ability_bonuses: &subrace.ability_bonuses,
            proficiencies: &subrace.starting_proficiencies,
            languages: &subrace.languages,
            traits: &subrace.racial_traits,
            proficiency_options: &subrace.starting_proficiency_options,
            language_options: &subrace.language_options,
        }
    }
}

pub async fn populate_races(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Races) else {
        tracing::warn!("Skipping races, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let races: Vec<RaceRecord> = document.records("Race");
    for race in &races {
        sqlx::query(
            r#"INSERT OR IGNORE INTO Race
               ("index", name, speed, alignment, age, size, size_description, language_desc)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&race.index)
        .bind(&race.name)
        .bind(race.speed)
        .bind(&race.alignment)
        .bind(&race.age)
        .bind(&race.size)
        .bind(&race.size_description)
        .bind(&race.language_desc)
        .execute(&mut *conn)
        .await
        .map_err(|e| ImportError::store(format!("insert Race '{}'", race.index), e))?;

        insert_dependents(conn, Lineage::Race, &race.index, Dependents::from(race)).await?;
    }

    tracing::info!(records = races.len(), "Race tables populated");
    Ok(StepOutcome::Populated {
        records: races.len(),
    })
}

pub async fn populate_subraces(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Subraces) else {
        tracing::warn!("Skipping subraces, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let subraces: Vec<SubraceRecord> = document.records("Subrace");
    for subrace in &subraces {
        sqlx::query(
            r#"INSERT OR IGNORE INTO Subrace ("index", name, race_index, description)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(&subrace.index)
        .bind(&subrace.name)
        .bind(&subrace.race.index)
        .bind(text_or_empty(subrace.desc.as_ref()))
        .execute(&mut *conn)
        .await
        .map_err(|e| ImportError::store(format!("insert Subrace '{}'", subrace.index), e))?;

        insert_dependents(
            conn,
            Lineage::Subrace,
            &subrace.index,
            Dependents::from(subrace),
        )
        .await?;
    }

    tracing::info!(records = subraces.len(), "Subrace tables populated");
    Ok(StepOutcome::Populated {
        records: subraces.len(),
    })
}

async fn insert_dependents(
    conn: &mut SqliteConnection,
    lineage: Lineage,
    owner: &str,
    dependents: Dependents<'_>,
) -> Result<(), ImportError> {
    let prefix = lineage.prefix();
    let owner_column = lineage.owner_column();

    let bonus_sql = format!(
        "INSERT OR IGNORE INTO {prefix}AbilityBonus ({owner_column}, ability_score_index, bonus) VALUES (?, ?, ?)"
    );
    for bonus in dependents.ability_bonuses {
        sqlx::query(&bonus_sql)
            .bind(owner)
            .bind(&bonus.ability_score.index)
            .bind(bonus.bonus)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(
                    format!(
                        "insert {prefix}AbilityBonus '{}' for '{owner}'",
                        bonus.ability_score.index
                    ),
                    e,
                )
            })?;
    }

    link_all(
        conn,
        &format!("{prefix}Proficiency"),
        owner_column,
        "proficiency_index",
        owner,
        dependents.proficiencies,
    )
    .await?;
    link_all(
        conn,
        &format!("{prefix}Language"),
        owner_column,
        "language_index",
        owner,
        dependents.languages,
    )
    .await?;

    for trait_ref in dependents.traits {
        ensure_feature_stub(conn, &trait_ref.index, trait_ref.display_name()).await?;
    }
    link_all(
        conn,
        &format!("{prefix}Feature"),
        owner_column,
        "feature_index",
        owner,
        dependents.traits,
    )
    .await?;

    resolve_choices(
        conn,
        lineage.proficiency_scope(),
        owner,
        dependents.proficiency_options,
    )
    .await?;
    resolve_choices(conn, lineage.language_scope(), owner, dependents.language_options).await?;

    Ok(())
}

/// Insert one `(owner, target)` join row per reference.
async fn link_all(
    conn: &mut SqliteConnection,
    table: &str,
    owner_column: &str,
    target_column: &str,
    owner: &str,
    targets: &[ApiReference],
) -> Result<(), ImportError> {
    let sql =
        format!("INSERT OR IGNORE INTO {table} ({owner_column}, {target_column}) VALUES (?, ?)");
    for target in targets {
        sqlx::query(&sql)
            .bind(owner)
            .bind(&target.index)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(format!("insert {table} '{}' for '{owner}'", target.index), e)
            })?;
    }
    Ok(())
}
