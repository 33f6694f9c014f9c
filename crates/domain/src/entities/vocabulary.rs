//! Entries of the closed reference vocabularies.
//!
//! Ability scores, damage types, magic schools, proficiencies, equipment
//! categories, weapon properties and languages all share one loose shape;
//! each vocabulary reads only the fields its table stores.

use serde::Deserialize;

use super::common::null_as_default;
use crate::text::Description;

/// One entry of a reference vocabulary document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VocabularyEntry {
    /// Stable identifier, unique within the vocabulary
    pub index: String,
    /// Display name
    pub name: String,
    /// Long name (ability scores: "Strength" for "STR")
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub desc: Option<Description>,
    /// Sub-type tag (proficiency kind, language rarity)
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    /// Writing system (languages only)
    #[serde(default)]
    pub script: Option<String>,
    /// Typical speakers (languages only)
    #[serde(default, deserialize_with = "null_as_default")]
    pub typical_speakers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::decode_record;
    use serde_json::json;

    #[test]
    fn decodes_language_entry() {
        let entry: VocabularyEntry = decode_record(
            "Language",
            &json!({
                "index": "elvish",
                "name": "Elvish",
                "type": "Standard",
                "script": "Elvish",
                "typical_speakers": ["Elves"]
            }),
        )
        .expect("decode");

        assert_eq!(entry.entry_type.as_deref(), Some("Standard"));
        assert_eq!(entry.typical_speakers, vec!["Elves".to_string()]);
        assert!(entry.desc.is_none());
    }

    #[test]
    fn entry_without_name_is_malformed() {
        assert!(decode_record::<VocabularyEntry>("DamageType", &json!({"index": "fire"})).is_err());
    }
}
