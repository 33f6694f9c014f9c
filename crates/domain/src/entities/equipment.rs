//! Equipment documents.
//!
//! One record shape covers weapons, armor, adventuring gear, tools and
//! vehicles; the attribute groups of the other kinds are simply absent.

use serde::Deserialize;

use super::common::{null_as_default, ApiReference};
use crate::text::Description;

/// An entry of the equipment document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentRecord {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub equipment_category: Option<ApiReference>,
    #[serde(default)]
    pub cost: Option<Cost>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub desc: Option<Description>,

    // Weapons
    #[serde(default)]
    pub weapon_category: Option<String>,
    #[serde(default)]
    pub weapon_range: Option<String>,
    #[serde(default)]
    pub category_range: Option<String>,
    #[serde(default)]
    pub damage: Option<Damage>,
    #[serde(default)]
    pub range: Option<Distance>,
    #[serde(default)]
    pub throw_range: Option<Distance>,
    #[serde(default)]
    pub two_handed_damage: Option<Damage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Vec<ApiReference>,

    // Armor
    #[serde(default)]
    pub armor_category: Option<String>,
    #[serde(default)]
    pub armor_class: Option<ArmorClass>,
    #[serde(default)]
    pub str_minimum: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stealth_disadvantage: bool,

    // Gear
    #[serde(default)]
    pub gear_category: Option<ApiReference>,

    // Tools and vehicles
    #[serde(default)]
    pub tool_category: Option<String>,
    #[serde(default)]
    pub vehicle_category: Option<String>,
    #[serde(default)]
    pub speed: Option<Speed>,
    #[serde(default)]
    pub capacity: Option<String>,

    /// Items bundled inside this one (equipment packs)
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: Vec<PackContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cost {
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Coin denomination ("gp", "sp", "cp")
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Damage {
    #[serde(default)]
    pub damage_dice: Option<String>,
    #[serde(default)]
    pub damage_type: Option<ApiReference>,
}

impl Damage {
    pub fn damage_type(&self) -> Option<&str> {
        self.damage_type.as_ref().map(|r| r.index.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Distance {
    #[serde(default)]
    pub normal: Option<i64>,
    #[serde(default)]
    pub long: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArmorClass {
    #[serde(default)]
    pub base: Option<i64>,
    #[serde(default)]
    pub dex_bonus: Option<bool>,
    #[serde(default)]
    pub max_bonus: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Speed {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// One line of a pack's contents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackContent {
    pub item: ApiReference,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}
