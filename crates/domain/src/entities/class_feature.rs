//! Feature and level-progression documents.

use serde::Deserialize;
use serde_json::Value;

use super::common::{null_as_default, ApiReference};
use crate::text::Description;

/// An entry of the features document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureRecord {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<Description>,
}

/// An entry of the levels document: one class or subclass at one level.
///
/// The class/subclass specific blocks vary in shape per class (rage counts,
/// sorcery points, ...) and are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelRecord {
    #[serde(default)]
    pub index: Option<String>,
    pub level: i64,
    #[serde(default)]
    pub class: Option<ApiReference>,
    #[serde(default)]
    pub subclass: Option<ApiReference>,
    #[serde(default)]
    pub prof_bonus: Option<i64>,
    #[serde(default)]
    pub ability_score_bonuses: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<ApiReference>,
    #[serde(default)]
    pub class_specific: Option<Value>,
    #[serde(default)]
    pub subclass_specific: Option<Value>,
    #[serde(default)]
    pub spellcasting: Option<SpellcastingProgression>,
}

impl LevelRecord {
    /// Who this level belongs to. Subclass levels also name their class, so
    /// the subclass wins.
    pub fn owner(&self) -> Option<LevelOwner<'_>> {
        match (&self.subclass, &self.class) {
            (Some(subclass), _) => Some(LevelOwner::Subclass(subclass)),
            (None, Some(class)) => Some(LevelOwner::Class(class)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOwner<'a> {
    Class(&'a ApiReference),
    Subclass(&'a ApiReference),
}

/// Spells known and slots for one class level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpellcastingProgression {
    #[serde(default)]
    pub cantrips_known: Option<i64>,
    #[serde(default)]
    pub spells_known: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_1: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_2: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_3: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_4: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_5: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_6: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_7: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_8: Option<i64>,
    #[serde(default)]
    pub spell_slots_level_9: Option<i64>,
}

impl SpellcastingProgression {
    /// Slot counts for spell levels 1 through 9, in order.
    pub fn spell_slots(&self) -> [Option<i64>; 9] {
        [
            self.spell_slots_level_1,
            self.spell_slots_level_2,
            self.spell_slots_level_3,
            self.spell_slots_level_4,
            self.spell_slots_level_5,
            self.spell_slots_level_6,
            self.spell_slots_level_7,
            self.spell_slots_level_8,
            self.spell_slots_level_9,
        ]
    }
}
