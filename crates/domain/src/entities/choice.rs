//! "Choose N of the following" structures.
//!
//! A choice looks like:
//!
//! ```json
//! {
//!   "desc": "Choose two from Animal Handling, Athletics, ...",
//!   "choose": 2,
//!   "type": "proficiencies",
//!   "from": {
//!     "option_set_type": "options_array",
//!     "options": [
//!       { "option_type": "reference", "item": { "index": "skill-athletics" } },
//!       { "option_type": "choice", "choice": { "choose": 1, "from": { "options": [...] } } }
//!     ]
//!   }
//! }
//! ```
//!
//! Only `reference` options are terminal. A `choice` option nests another
//! option set whose terminal options belong to the enclosing choice.

use serde::Deserialize;
use serde_json::Value;

use super::common::{json_kind, null_as_default, ApiReference};
use crate::error::DomainError;

/// A top-level choice entry owned by a class, race or subrace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    /// Human-readable summary of the choice
    #[serde(default)]
    pub desc: Option<String>,
    /// How many options the player picks
    pub choose: u32,
    /// Type tag (e.g. "proficiencies", "languages")
    #[serde(rename = "type")]
    pub choice_type: String,
    /// Where the options come from
    #[serde(default)]
    pub from: Option<OptionSet>,
}

impl Choice {
    /// Decode and validate one raw choice entry.
    pub fn parse(value: &Value) -> Result<Self, DomainError> {
        if !value.is_object() {
            return Err(DomainError::invalid_choice(format!(
                "expected an object, found {}",
                json_kind(value)
            )));
        }
        let choice = Choice::deserialize(value)
            .map_err(|e| DomainError::invalid_choice(e.to_string()))?;
        if choice.choose == 0 {
            return Err(DomainError::invalid_choice("`choose` must be at least 1"));
        }
        Ok(choice)
    }

    /// Options of this choice, or an empty slice when `from` is absent.
    pub fn options(&self) -> &[Value] {
        self.from.as_ref().map(OptionSet::options).unwrap_or(&[])
    }
}

/// The `from` block of a choice.
///
/// Sets backed by a resource list or an equipment category carry no
/// `options` array and therefore contribute no terminal options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionSet {
    #[serde(default)]
    pub option_set_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<Value>,
}

impl OptionSet {
    pub fn options(&self) -> &[Value] {
        &self.options
    }
}

/// One option inside an option set, tagged by `option_type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "option_type", rename_all = "snake_case")]
pub enum ChoiceOption {
    /// Terminal option pointing at a reference item
    Reference { item: ApiReference },
    /// A nested choice; only its option set is meaningful here
    Choice { choice: NestedChoice },
    /// Option kinds that never resolve to a single reference
    /// (`counted_reference`, `multiple`, `string`, ...)
    #[serde(other)]
    Other,
}

impl ChoiceOption {
    pub fn parse(value: &Value) -> Result<Self, DomainError> {
        ChoiceOption::deserialize(value).map_err(|e| DomainError::invalid_choice(e.to_string()))
    }
}

/// A choice nested inside an option. Its description and count are discarded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NestedChoice {
    #[serde(default)]
    pub from: Option<OptionSet>,
}

impl NestedChoice {
    pub fn options(&self) -> &[Value] {
        self.from.as_ref().map(OptionSet::options).unwrap_or(&[])
    }
}
