//! Read-only queries over a finished store.
//!
//! This is what the viewer reads. Every projection is ordered so callers can
//! render it directly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use srdbldr_domain::SpellLevel;

use super::schema::{quote_ident, table_names};
use crate::infrastructure::error::ImportError;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ClassRow {
    pub index: String,
    pub name: String,
    pub hit_die: Option<i64>,
    pub spellcasting_ability_index: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SpellRow {
    pub index: String,
    pub name: String,
    pub level: Option<i64>,
    pub school_index: Option<String>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub duration: Option<String>,
    pub ritual: bool,
    pub concentration: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct EquipmentRow {
    pub index: String,
    pub name: String,
    pub equipment_category_index: Option<String>,
    pub category_name: Option<String>,
    pub cost_quantity: Option<i64>,
    pub cost_unit: Option<String>,
    pub weight: Option<f64>,
    pub description: Option<String>,
}

/// Equipment sharing one category, in name order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentGroup {
    pub category_index: Option<String>,
    pub category_name: Option<String>,
    pub items: Vec<EquipmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FeatureRow {
    pub index: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FeatRow {
    pub index: String,
    pub name: String,
    pub prerequisites_json: Option<String>,
    pub description: Option<String>,
}

/// One race, paired with one of its subraces (or none).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RaceRow {
    pub race_index: String,
    pub race_name: String,
    pub speed: Option<i64>,
    pub size: Option<String>,
    pub subrace_index: Option<String>,
    pub subrace_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// A read-only connection to a store file.
pub struct Catalog {
    conn: SqliteConnection,
}

impl Catalog {
    pub async fn open(path: &Path) -> Result<Self, ImportError> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .connect()
            .await
            .map_err(|e| ImportError::store(format!("open catalog {}", path.display()), e))?;
        Ok(Self { conn })
    }

    pub async fn classes(&mut self) -> Result<Vec<ClassRow>, ImportError> {
        sqlx::query_as::<_, ClassRow>(
            r#"SELECT "index", name, hit_die, spellcasting_ability_index
               FROM Class ORDER BY name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list classes", e))
    }

    pub async fn spells(&mut self) -> Result<Vec<SpellRow>, ImportError> {
        sqlx::query_as::<_, SpellRow>(
            r#"SELECT "index", name, level, school_index, casting_time, "range",
                      duration, ritual, concentration, description
               FROM Spell ORDER BY level, name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list spells", e))
    }

    /// Spells grouped by level, cantrips first. Spells without a level are left out.
    pub async fn spells_by_level(
        &mut self,
    ) -> Result<BTreeMap<SpellLevel, Vec<SpellRow>>, ImportError> {
        let mut grouped: BTreeMap<SpellLevel, Vec<SpellRow>> = BTreeMap::new();
        for spell in self.spells().await? {
            let Some(level) = spell.level.and_then(|l| u8::try_from(l).ok()) else {
                continue;
            };
            grouped.entry(SpellLevel::from(level)).or_default().push(spell);
        }
        Ok(grouped)
    }

    pub async fn equipment(&mut self) -> Result<Vec<EquipmentRow>, ImportError> {
        sqlx::query_as::<_, EquipmentRow>(
            r#"SELECT e."index", e.name, e.equipment_category_index, c.name AS category_name,
                      e.cost_quantity, e.cost_unit, e.weight, e.description
               FROM Equipment e
               LEFT JOIN EquipmentCategory c ON c."index" = e.equipment_category_index
               ORDER BY e.equipment_category_index, e.name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list equipment", e))
    }

    pub async fn equipment_by_category(&mut self) -> Result<Vec<EquipmentGroup>, ImportError> {
        let mut groups: Vec<EquipmentGroup> = Vec::new();
        for item in self.equipment().await? {
            match groups.last_mut() {
                Some(group) if group.category_index == item.equipment_category_index => {
                    group.items.push(item)
                }
                _ => groups.push(EquipmentGroup {
                    category_index: item.equipment_category_index.clone(),
                    category_name: item.category_name.clone(),
                    items: vec![item],
                }),
            }
        }
        Ok(groups)
    }

    pub async fn features(&mut self) -> Result<Vec<FeatureRow>, ImportError> {
        sqlx::query_as::<_, FeatureRow>(
            r#"SELECT "index", name, description FROM Feature ORDER BY name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list features", e))
    }

    pub async fn feats(&mut self) -> Result<Vec<FeatRow>, ImportError> {
        sqlx::query_as::<_, FeatRow>(
            r#"SELECT "index", name, prerequisites_json, description FROM Feat ORDER BY name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list feats", e))
    }

    pub async fn races(&mut self) -> Result<Vec<RaceRow>, ImportError> {
        sqlx::query_as::<_, RaceRow>(
            r#"SELECT r."index" AS race_index, r.name AS race_name, r.speed, r.size,
                      s."index" AS subrace_index, s.name AS subrace_name
               FROM Race r
               LEFT JOIN Subrace s ON s.race_index = r."index"
               ORDER BY r.name, s.name"#,
        )
        .fetch_all(&mut self.conn)
        .await
        .map_err(|e| ImportError::store("list races", e))
    }

    /// Row count of every table, in schema order.
    pub async fn table_counts(&mut self) -> Result<Vec<TableCount>, ImportError> {
        let mut counts = Vec::new();
        for table in table_names() {
            let rows: i64 = sqlx::query_scalar(&format!(
                "SELECT COUNT(*) FROM {}",
                quote_ident(table)
            ))
            .fetch_one(&mut self.conn)
            .await
            .map_err(|e| ImportError::store(format!("count rows of {table}"), e))?;
            counts.push(TableCount { table, rows });
        }
        Ok(counts)
    }

    pub async fn close(self) -> Result<(), ImportError> {
        self.conn
            .close()
            .await
            .map_err(|e| ImportError::store("close catalog", e))
    }
}
