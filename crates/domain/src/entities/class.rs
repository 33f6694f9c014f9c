//! Class and subclass documents.

use serde::Deserialize;

use super::common::{null_as_default, ApiReference, ChoiceList};
use crate::text::Description;

/// An entry of the classes document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassRecord {
    pub index: String,
    pub name: String,
    /// Hit die size (d6, d8, ...), stored as the number of faces
    #[serde(default)]
    pub hit_die: Option<i64>,
    #[serde(default)]
    pub spellcasting: Option<ClassSpellcasting>,
    /// Subclasses are only named here; their details live in another document
    #[serde(default, deserialize_with = "null_as_default")]
    pub subclasses: Vec<ApiReference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proficiencies: Vec<ApiReference>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saving_throws: Vec<ApiReference>,
    #[serde(default)]
    pub proficiency_choices: ChoiceList,
}

impl ClassRecord {
    pub fn spellcasting_level(&self) -> Option<i64> {
        self.spellcasting.as_ref().and_then(|s| s.level)
    }

    pub fn spellcasting_ability(&self) -> Option<&str> {
        self.spellcasting
            .as_ref()
            .and_then(|s| s.spellcasting_ability.as_ref())
            .map(|a| a.index.as_str())
    }
}

/// Spellcasting block of a class.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassSpellcasting {
    /// Class level at which spellcasting starts
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub spellcasting_ability: Option<ApiReference>,
}

/// An entry of the subclasses document (the detail half of a subclass).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubclassRecord {
    pub index: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub class: Option<ApiReference>,
    #[serde(default)]
    pub subclass_flavor: Option<String>,
    #[serde(default)]
    pub desc: Option<Description>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::decode_record;
    use serde_json::json;

    #[test]
    fn decodes_caster_class() {
        let class: ClassRecord = decode_record(
            "Class",
            &json!({
                "index": "wizard",
                "name": "Wizard",
                "hit_die": 6,
                "spellcasting": {"level": 1, "spellcasting_ability": {"index": "int", "name": "INT"}},
                "subclasses": [{"index": "evocation", "name": "Evocation"}],
                "proficiencies": [{"index": "daggers", "name": "Daggers"}],
                "saving_throws": [{"index": "int"}, {"index": "wis"}],
                "proficiency_choices": [{"choose": 2, "type": "proficiencies"}]
            }),
        )
        .expect("decode");

        assert_eq!(class.spellcasting_level(), Some(1));
        assert_eq!(class.spellcasting_ability(), Some("int"));
        assert_eq!(class.subclasses.len(), 1);
        assert_eq!(class.saving_throws.len(), 2);
        assert_eq!(class.proficiency_choices.entries().len(), 1);
    }

    #[test]
    fn martial_class_has_no_spellcasting() {
        let class: ClassRecord = decode_record(
            "Class",
            &json!({"index": "fighter", "name": "Fighter", "hit_die": 10, "subclasses": null}),
        )
        .expect("decode");

        assert_eq!(class.spellcasting_level(), None);
        assert_eq!(class.spellcasting_ability(), None);
        assert!(class.subclasses.is_empty());
    }
}
