//! Race and subrace documents.

use serde::Deserialize;

use super::common::{null_as_default, ApiReference, ChoiceList};
use crate::text::Description;

/// A fixed ability score increase granted by a race or subrace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityBonus {
    pub ability_score: ApiReference,
    pub bonus: i64,
}

/// An entry of the races document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaceRecord {
    pub index: String,
    pub name: String,
    /// Walking speed in feet
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub size_description: Option<String>,
    #[serde(default)]
    pub language_desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ability_bonuses: Vec<AbilityBonus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starting_proficiencies: Vec<ApiReference>,
    #[serde(default)]
    pub starting_proficiency_options: ChoiceList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<ApiReference>,
    #[serde(default)]
    pub language_options: ChoiceList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub traits: Vec<ApiReference>,
}

/// An entry of the subraces document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubraceRecord {
    pub index: String,
    pub name: String,
    /// Parent race
    pub race: ApiReference,
    #[serde(default)]
    pub desc: Option<Description>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ability_bonuses: Vec<AbilityBonus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starting_proficiencies: Vec<ApiReference>,
    #[serde(default)]
    pub starting_proficiency_options: ChoiceList,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<ApiReference>,
    #[serde(default)]
    pub language_options: ChoiceList,
    /// Called "racial_traits" in subrace documents; same relation as race traits
    #[serde(default, deserialize_with = "null_as_default")]
    pub racial_traits: Vec<ApiReference>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::decode_record;
    use serde_json::json;

    #[test]
    fn decodes_race_with_single_object_options() {
        let race: RaceRecord = decode_record(
            "Race",
            &json!({
                "index": "half-elf",
                "name": "Half-Elf",
                "speed": 30,
                "ability_bonuses": [{"ability_score": {"index": "cha"}, "bonus": 2}],
                "languages": [{"index": "common"}, {"index": "elvish"}],
                "language_options": {"choose": 1, "type": "languages", "from": {"options": []}},
                "starting_proficiency_options": {"choose": 2, "type": "proficiencies"},
                "traits": [{"index": "darkvision", "name": "Darkvision"}]
            }),
        )
        .expect("decode");

        assert_eq!(race.ability_bonuses[0].bonus, 2);
        assert_eq!(race.language_options.entries().len(), 1);
        assert_eq!(race.starting_proficiency_options.entries().len(), 1);
        assert_eq!(race.traits.len(), 1);
    }

    #[test]
    fn subrace_requires_parent_race() {
        let missing = decode_record::<SubraceRecord>(
            "Subrace",
            &json!({"index": "high-elf", "name": "High Elf"}),
        );
        assert!(missing.is_err());

        let subrace: SubraceRecord = decode_record(
            "Subrace",
            &json!({
                "index": "high-elf",
                "name": "High Elf",
                "race": {"index": "elf"},
                "desc": "As a high elf, you have a keen mind.",
                "racial_traits": [{"index": "elf-weapon-training"}]
            }),
        )
        .expect("decode");
        assert_eq!(subrace.race.index, "elf");
        assert_eq!(subrace.racial_traits.len(), 1);
    }
}
