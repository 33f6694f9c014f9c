//! Spell documents.

use serde::Deserialize;

use super::common::{null_as_default, ApiReference};
use crate::text::Description;

/// An entry of the spells document.
///
/// Damage type, saving throw and school are kept as the raw indexes given in
/// the document; they are not required to exist in their vocabularies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpellRecord {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<Description>,
    /// Effect when cast with a higher-level slot
    #[serde(default)]
    pub higher_level: Option<Description>,
    #[serde(default)]
    pub range: Option<String>,
    /// Component letters ("V", "S", "M")
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ritual: bool,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub concentration: bool,
    #[serde(default)]
    pub casting_time: Option<String>,
    /// Spell level (0 for cantrips)
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default)]
    pub damage: Option<SpellDamage>,
    #[serde(default)]
    pub dc: Option<SpellDc>,
    #[serde(default)]
    pub area_of_effect: Option<AreaOfEffect>,
    #[serde(default)]
    pub school: Option<ApiReference>,
    /// Classes that can learn this spell
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<ApiReference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subclasses: Vec<ApiReference>,
}

impl SpellRecord {
    /// Components joined into a single column value ("V,S,M").
    pub fn components_text(&self) -> String {
        self.components.join(",")
    }

    pub fn damage_type(&self) -> Option<&str> {
        self.damage
            .as_ref()
            .and_then(|d| d.damage_type.as_ref())
            .map(|r| r.index.as_str())
    }

    pub fn dc_type(&self) -> Option<&str> {
        self.dc
            .as_ref()
            .and_then(|dc| dc.dc_type.as_ref())
            .map(|r| r.index.as_str())
    }

    pub fn dc_success(&self) -> Option<&str> {
        self.dc.as_ref().and_then(|dc| dc.dc_success.as_deref())
    }

    pub fn school(&self) -> Option<&str> {
        self.school.as_ref().map(|r| r.index.as_str())
    }
}

/// Damage block of a spell. Per-slot damage tables are not stored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpellDamage {
    #[serde(default)]
    pub damage_type: Option<ApiReference>,
}

/// Saving throw block of a spell.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpellDc {
    #[serde(default)]
    pub dc_type: Option<ApiReference>,
    /// Effect on a successful save ("half", "none")
    #[serde(default)]
    pub dc_success: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AreaOfEffect {
    #[serde(default, rename = "type")]
    pub shape: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
}

/// Spell level representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpellLevel {
    /// Cantrip (level 0 spell, can be cast at will)
    Cantrip,
    /// Leveled spell (1-9)
    Level(u8),
}

impl From<u8> for SpellLevel {
    fn from(level: u8) -> Self {
        if level == 0 {
            SpellLevel::Cantrip
        } else {
            SpellLevel::Level(level)
        }
    }
}
