//! Text normalization for document descriptions.
//!
//! Source documents supply long-form text either as an array of lines or as a
//! single string. Arrays are joined with a newline; that is the only
//! normalization applied anywhere in the store.

use serde::Deserialize;

/// Separator used when collapsing description arrays into one text field.
pub const LINE_SEPARATOR: &str = "\n";

/// A description as it appears in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Lines(Vec<String>),
    Text(String),
}

impl Description {
    /// Collapse into a single text value.
    pub fn to_text(&self) -> String {
        match self {
            Description::Lines(lines) => join_lines(lines),
            Description::Text(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Description::Lines(lines) => lines.is_empty(),
            Description::Text(text) => text.is_empty(),
        }
    }
}

/// Join description lines with the canonical separator.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Text for a description column that is never NULL (absent becomes "").
pub fn text_or_empty(desc: Option<&Description>) -> String {
    desc.map(Description::to_text).unwrap_or_default()
}

/// Text for a description column that stays NULL when absent or empty.
pub fn non_empty_text(desc: Option<&Description>) -> Option<String> {
    desc.filter(|d| !d.is_empty()).map(Description::to_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_joined_with_newline() {
        let desc: Description =
            serde_json::from_str(r#"["First paragraph.", "Second paragraph."]"#)
                .expect("parse");
        assert_eq!(desc.to_text(), "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn plain_string_is_kept() {
        let desc: Description = serde_json::from_str(r#""Abjuration spells""#).expect("parse");
        assert_eq!(desc.to_text(), "Abjuration spells");
    }

    #[test]
    fn absent_description_handling() {
        assert_eq!(text_or_empty(None), "");
        assert_eq!(non_empty_text(None), None);
        assert_eq!(non_empty_text(Some(&Description::Lines(vec![]))), None);
        assert_eq!(
            non_empty_text(Some(&Description::Text("x".into()))),
            Some("x".to_string())
        );
    }
}
