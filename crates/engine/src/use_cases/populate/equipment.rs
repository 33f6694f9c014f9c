//! Equipment, weapon properties and pack contents.

use sqlx::SqliteConnection;
use srdbldr_domain::{non_empty_text, EquipmentRecord};

use super::StepOutcome;
use crate::infrastructure::error::ImportError;
use crate::infrastructure::importers::{DocumentKind, DocumentSet};

pub async fn populate_equipment(
    conn: &mut SqliteConnection,
    documents: &DocumentSet,
) -> Result<StepOutcome, ImportError> {
    let Some(document) = documents.get(DocumentKind::Equipment) else {
        tracing::warn!("Skipping equipment, document not loaded");
        return Ok(StepOutcome::Skipped);
    };

    let items: Vec<EquipmentRecord> = document.records("Equipment");
    for item in &items {
        insert_item(conn, item).await?;
    }

    tracing::info!(records = items.len(), "Equipment tables populated");
    Ok(StepOutcome::Populated {
        records: items.len(),
    })
}

async fn insert_item(
    conn: &mut SqliteConnection,
    item: &EquipmentRecord,
) -> Result<(), ImportError> {
    let damage = item.damage.as_ref();
    let two_handed = item.two_handed_damage.as_ref();
    let range = item.range.as_ref();
    let throw_range = item.throw_range.as_ref();
    let armor_class = item.armor_class.as_ref();
    let cost = item.cost.as_ref();
    let speed = item.speed.as_ref();

    sqlx::query(
        r#"INSERT OR IGNORE INTO Equipment
           ("index", name, equipment_category_index, cost_quantity, cost_unit, weight,
            description, weapon_category, weapon_range, category_range, damage_dice,
            damage_type_index, range_normal, range_long, throw_range_normal, throw_range_long,
            two_handed_damage_dice, two_handed_damage_type_index, armor_category,
            armor_class_base, armor_class_dex_bonus, armor_class_max_bonus, str_minimum,
            stealth_disadvantage, gear_category_index, tool_category, vehicle_category,
            speed_quantity, speed_unit, capacity)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&item.index)
    .bind(&item.name)
    .bind(item.equipment_category.as_ref().map(|c| c.index.as_str()))
    .bind(cost.and_then(|c| c.quantity))
    .bind(cost.and_then(|c| c.unit.as_deref()))
    .bind(item.weight)
    .bind(non_empty_text(item.desc.as_ref()))
    .bind(&item.weapon_category)
    .bind(&item.weapon_range)
    .bind(&item.category_range)
    .bind(damage.and_then(|d| d.damage_dice.as_deref()))
    .bind(damage.and_then(|d| d.damage_type()))
    .bind(range.and_then(|r| r.normal))
    .bind(range.and_then(|r| r.long))
    .bind(throw_range.and_then(|r| r.normal))
    .bind(throw_range.and_then(|r| r.long))
    .bind(two_handed.and_then(|d| d.damage_dice.as_deref()))
    .bind(two_handed.and_then(|d| d.damage_type()))
    .bind(&item.armor_category)
    .bind(armor_class.and_then(|ac| ac.base))
    .bind(armor_class.and_then(|ac| ac.dex_bonus))
    .bind(armor_class.and_then(|ac| ac.max_bonus))
    .bind(item.str_minimum.unwrap_or(0))
    .bind(item.stealth_disadvantage)
    .bind(item.gear_category.as_ref().map(|c| c.index.as_str()))
    .bind(&item.tool_category)
    .bind(&item.vehicle_category)
    .bind(speed.and_then(|s| s.quantity))
    .bind(speed.and_then(|s| s.unit.as_deref()))
    .bind(&item.capacity)
    .execute(&mut *conn)
    .await
    .map_err(|e| ImportError::store(format!("insert Equipment '{}'", item.index), e))?;

    for property in &item.properties {
        sqlx::query(
            "INSERT OR IGNORE INTO EquipmentProperty (equipment_index, property_index) VALUES (?, ?)",
        )
        .bind(&item.index)
        .bind(&property.index)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!(
                    "insert EquipmentProperty '{}' for '{}'",
                    property.index, item.index
                ),
                e,
            )
        })?;
    }

    // Contents only link to items already stored, so earlier entries win.
    for content in &item.contents {
        let exists: Option<i64> = sqlx::query_scalar(r#"SELECT 1 FROM Equipment WHERE "index" = ?"#)
            .bind(&content.item.index)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                ImportError::store(format!("look up Equipment '{}'", content.item.index), e)
            })?;

        if exists.is_none() {
            tracing::debug!(
                pack = %item.index,
                content = %content.item.index,
                "Pack content not stored yet, skipping"
            );
            continue;
        }

        sqlx::query(
            r#"INSERT OR IGNORE INTO EquipmentContent
               (pack_equipment_index, content_equipment_index, quantity)
               VALUES (?, ?, ?)"#,
        )
        .bind(&item.index)
        .bind(&content.item.index)
        .bind(content.quantity)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            ImportError::store(
                format!(
                    "insert EquipmentContent '{}' for '{}'",
                    content.item.index, item.index
                ),
                e,
            )
        })?;
    }

    Ok(())
}
