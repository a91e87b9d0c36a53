#![forbid(unsafe_code)]

//! Term records: the external JSON shape and the internal record.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Position of a record in its [`TermStore`](crate::store::TermStore).
///
/// Ids are dense and stable for the lifetime of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub u32);

impl TermId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record's category as found in the data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    Known(Category),
    /// Label that is not part of the enumeration, kept verbatim.
    Unknown(String),
}

impl CategoryTag {
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match Category::from_label(label) {
            Some(cat) => Self::Known(cat),
            None => Self::Unknown(label.to_owned()),
        }
    }

    #[must_use]
    pub fn known(&self) -> Option<Category> {
        match self {
            Self::Known(cat) => Some(*cat),
            Self::Unknown(_) => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(cat) => cat.label(),
            Self::Unknown(raw) => raw,
        }
    }
}

/// One glossary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    pub id: TermId,
    pub name: String,
    pub category: CategoryTag,
    pub description: String,
    pub examples: Vec<String>,
}

impl TermRecord {
    /// Category if it belongs to the enumeration.
    #[must_use]
    pub fn known_category(&self) -> Option<Category> {
        self.category.known()
    }
}

/// External record shape, field names as they appear in `terms.json`.
///
/// Every field is optional and degrades on its own: a missing, `null` or
/// non-string field reads as empty, `examples` keeps only its string
/// elements, and a non-list `examples` reads as no examples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTerm {
    #[serde(deserialize_with = "lenient_string")]
    pub term: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub examples: Vec<String>,
}

impl RawTerm {
    /// Convenience constructor used by embedded data and tests.
    #[must_use]
    pub fn new(
        term: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        examples: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            term: term.into(),
            category: category.into(),
            description: description.into(),
            examples: examples.into_iter().map(Into::into).collect(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tag_keeps_unknown_label() {
        assert_eq!(CategoryTag::parse("Fiscal"), CategoryTag::Known(Category::Fiscal));
        let tag = CategoryTag::parse("Aduanero");
        assert_eq!(tag.known(), None);
        assert_eq!(tag.label(), "Aduanero");
    }

    #[test]
    fn raw_term_missing_fields_default() {
        let raw: RawTerm = serde_json::from_str(r#"{"term":"Activo"}"#).unwrap();
        assert_eq!(raw.term, "Activo");
        assert!(raw.category.is_empty());
        assert!(raw.description.is_empty());
        assert!(raw.examples.is_empty());
    }

    #[test]
    fn raw_term_null_examples_are_empty() {
        let raw: RawTerm =
            serde_json::from_str(r#"{"term":"Pasivo","examples":null}"#).unwrap();
        assert!(raw.examples.is_empty());
    }

    #[test]
    fn raw_term_null_and_non_string_fields_are_empty() {
        let raw: RawTerm = serde_json::from_str(
            r#"{"term":"Activo","category":null,"description":42,"examples":["Caja"]}"#,
        )
        .unwrap();
        assert_eq!(raw.term, "Activo");
        assert_eq!(raw.category, "");
        assert_eq!(raw.description, "");
        assert_eq!(raw.examples, vec!["Caja".to_string()]);

        let raw: RawTerm = serde_json::from_str(r#"{"term":null,"category":true}"#).unwrap();
        assert_eq!(raw.term, "");
        assert_eq!(raw.category, "");
    }

    #[test]
    fn raw_term_keeps_only_string_examples() {
        let raw: RawTerm = serde_json::from_str(
            r#"{"term":"Pasivo","examples":["Caja",5,null,{"a":1},"Bancos"]}"#,
        )
        .unwrap();
        assert_eq!(raw.examples, vec!["Caja".to_string(), "Bancos".to_string()]);
    }

    #[test]
    fn raw_term_scalar_examples_are_empty() {
        for examples in [r#""Caja""#, "7", "false", r#"{"x":"Caja"}"#] {
            let json = format!(r#"{{"term":"Acta","examples":{examples}}}"#);
            let raw: RawTerm = serde_json::from_str(&json).unwrap();
            assert!(raw.examples.is_empty(), "{examples}");
            assert_eq!(raw.term, "Acta");
        }
    }
}
