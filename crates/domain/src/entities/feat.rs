//! Feat documents.

use serde::Deserialize;
use serde_json::Value;

use super::common::null_as_default;
use crate::text::Description;

/// An entry of the feats document.
///
/// Prerequisites (an ability and a minimum score each) are kept as raw JSON;
/// they are archived verbatim rather than modeled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatRecord {
    pub index: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prerequisites: Vec<Value>,
    #[serde(default)]
    pub desc: Option<Description>,
}

impl FeatRecord {
    /// Serialized prerequisite list, or `None` when the feat has none.
    pub fn prerequisites_json(&self) -> Option<String> {
        if self.prerequisites.is_empty() {
            return None;
        }
        Some(Value::Array(self.prerequisites.clone()).to_string())
    }
}
