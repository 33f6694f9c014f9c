//! Building blocks shared by every source document record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DomainError;

/// A pointer from one document entry to another entry by its stable `index`.
///
/// Documents embed these as `{"index": "...", "name": "...", "url": "..."}`;
/// only the index is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiReference {
    pub index: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ApiReference {
    pub fn new(index: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: Some(name.into()),
        }
    }

    /// Display name, falling back to the index when the reference omits it.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.index)
    }
}

/// Raw choice entries attached to a record (`proficiency_choices`,
/// `language_options`, ...).
///
/// Entries are kept undecoded so a malformed entry only costs itself. A single
/// object where an array was expected counts as one entry; `null` or absence
/// counts as none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceList(Vec<Value>);

impl ChoiceList {
    pub fn entries(&self) -> &[Value] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for ChoiceList {
    fn from(entries: Vec<Value>) -> Self {
        Self(entries)
    }
}

impl<'de> Deserialize<'de> for ChoiceList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Self(Vec::new()),
            Value::Array(entries) => Self(entries),
            other => Self(vec![other]),
        })
    }
}

/// Treat an explicit `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode one document entry into its record type.
pub fn decode_record<T: DeserializeOwned>(
    entity_type: &'static str,
    value: &Value,
) -> Result<T, DomainError> {
    if !value.is_object() {
        return Err(DomainError::malformed(
            entity_type,
            format!("expected an object, found {}", json_kind(value)),
        ));
    }
    T::deserialize(value).map_err(|e| DomainError::malformed(entity_type, e.to_string()))
}

/// Short name of a JSON value's type, for diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default)]
        choices: ChoiceList,
        #[serde(default, deserialize_with = "null_as_default")]
        refs: Vec<ApiReference>,
    }

    #[test]
    fn choice_list_accepts_every_shape() {
        let h: Holder =
            decode_record("Test", &json!({"choices": [{"a": 1}, null]})).expect("decode");
        assert_eq!(h.choices.entries().len(), 2);

        let h: Holder = decode_record("Test", &json!({"choices": {"a": 1}})).expect("decode");
        assert_eq!(h.choices.entries().len(), 1);

        let h: Holder = decode_record("Test", &json!({"choices": null})).expect("decode");
        assert!(h.choices.is_empty());

        let h: Holder = decode_record("Test", &json!({})).expect("decode");
        assert!(h.choices.is_empty());
    }

    #[test]
    fn null_list_is_empty() {
        let h: Holder = decode_record("Test", &json!({"refs": null})).expect("decode");
        assert!(h.refs.is_empty());
    }

    #[test]
    fn non_object_record_is_malformed() {
        let err = decode_record::<Holder>("Race", &json!("elf")).expect_err("should fail");
        assert_eq!(
            err,
            DomainError::malformed("Race", "expected an object, found string")
        );
    }

    #[test]
    fn reference_display_name_falls_back_to_index() {
        let r: ApiReference =
            serde_json::from_value(json!({"index": "darkvision"})).expect("decode");
        assert_eq!(r.display_name(), "darkvision");
        assert_eq!(ApiReference::new("elf", "Elf").display_name(), "Elf");
    }
}
