#![forbid(unsafe_code)]

//! Data sources for the term store.
//!
//! Embedded data and fetched documents go through the same path: a source
//! yields [`ParsedTerms`], and [`TermStore::from_source`](crate::store::TermStore::from_source)
//! maps and validates them. Fetching itself is the host's job; a fetched body
//! is handed over as a [`JsonSource`].

use serde::Deserialize;

use crate::store::StoreError;
use crate::term::RawTerm;

/// Records extracted from a source, plus entries that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTerms {
    pub terms: Vec<(usize, RawTerm)>,
    /// `(position in the document, reason)` for entries that were skipped.
    pub malformed: Vec<(usize, String)>,
}

impl ParsedTerms {
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = RawTerm>) -> Self {
        Self {
            terms: records.into_iter().enumerate().collect(),
            malformed: Vec::new(),
        }
    }
}

/// Anything that can produce the raw term list once at startup.
pub trait TermSource {
    /// Short human-readable origin used in logs.
    fn origin(&self) -> &str;

    /// Produce the raw records.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the document as a whole is unreadable.
    fn read(&self) -> Result<ParsedTerms, StoreError>;
}

/// Data compiled into the binary, either as records or as a JSON string.
#[derive(Debug, Clone)]
pub enum EmbeddedSource {
    Records(Vec<RawTerm>),
    Json(&'static str),
}

impl TermSource for EmbeddedSource {
    fn origin(&self) -> &str {
        "embedded"
    }

    fn read(&self) -> Result<ParsedTerms, StoreError> {
        match self {
            Self::Records(records) => Ok(ParsedTerms::from_records(records.iter().cloned())),
            Self::Json(text) => parse_terms_json(text),
        }
    }
}

/// A document body obtained by the host (typically `fetch("terms.json")`).
#[derive(Debug, Clone)]
pub struct JsonSource {
    origin: String,
    body: String,
}

impl JsonSource {
    #[must_use]
    pub fn new(origin: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            body: body.into(),
        }
    }
}

impl TermSource for JsonSource {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn read(&self) -> Result<ParsedTerms, StoreError> {
        parse_terms_json(&self.body)
    }
}

/// Parse a `terms.json` document.
///
/// The top level must be an array. Entries that are not objects are skipped
/// and reported in [`ParsedTerms::malformed`]; fields with the wrong JSON type
/// degrade per field (see [`RawTerm`]).
///
/// # Errors
/// [`StoreError::Json`] for invalid JSON, [`StoreError::NotAnArray`] when the
/// top-level value is not an array.
pub fn parse_terms_json(text: &str) -> Result<ParsedTerms, StoreError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(StoreError::NotAnArray);
    };

    let mut parsed = ParsedTerms::default();
    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            parsed
                .malformed
                .push((index, format!("expected an object, found {}", json_kind(&entry))));
            continue;
        }
        match RawTerm::deserialize(entry) {
            Ok(raw) => parsed.terms.push((index, raw)),
            Err(err) => parsed.malformed.push((index, err.to_string())),
        }
    }
    Ok(parsed)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_of_terms() {
        let parsed = parse_terms_json(
            r#"[{"term":"Activo","category":"Contable","description":"Recursos","examples":["Caja"]}]"#,
        )
        .unwrap();
        assert_eq!(parsed.terms.len(), 1);
        assert_eq!(parsed.terms[0].0, 0);
        assert_eq!(parsed.terms[0].1.examples, vec!["Caja".to_string()]);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn skips_only_non_object_entries() {
        let parsed =
            parse_terms_json(r#"["solo texto", {"term": 5}, ["Acta", "Legal"], null, {"term":"Pasivo"}]"#)
                .unwrap();
        let kept: Vec<usize> = parsed.terms.iter().map(|(i, _)| *i).collect();
        assert_eq!(kept, vec![1, 4]);
        assert_eq!(parsed.terms[0].1.term, "");
        let skipped: Vec<usize> = parsed.malformed.iter().map(|(i, _)| *i).collect();
        assert_eq!(skipped, vec![0, 2, 3]);
        assert_eq!(parsed.malformed[0].1, "expected an object, found a string");
        assert_eq!(parsed.malformed[1].1, "expected an object, found an array");
    }

    #[test]
    fn bad_fields_degrade_without_dropping_the_record() {
        let parsed = parse_terms_json(
            r#"[
              {"term":"Activo","category":"Contable","description":null,"examples":["Caja"]},
              {"term":"Pasivo","category":"Contable","description":"Deudas","examples":["Caja",5]},
              {"term":"Acta","category":"Legal","description":"Documento","examples":"Caja"}
            ]"#,
        )
        .unwrap();
        assert!(parsed.malformed.is_empty());
        let terms: Vec<&RawTerm> = parsed.terms.iter().map(|(_, t)| t).collect();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].description, "");
        assert_eq!(terms[0].examples, vec!["Caja".to_string()]);
        assert_eq!(terms[1].examples, vec!["Caja".to_string()]);
        assert!(terms[2].examples.is_empty());
    }

    #[test]
    fn rejects_non_array_document() {
        assert_eq!(
            parse_terms_json(r#"{"term":"Activo"}"#),
            Err(StoreError::NotAnArray)
        );
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(parse_terms_json("[{"), Err(StoreError::Json(_))));
    }

    #[test]
    fn embedded_records_keep_order() {
        let source = EmbeddedSource::Records(vec![
            RawTerm::new("B", "Legal", "", Vec::<String>::new()),
            RawTerm::new("A", "Legal", "", Vec::<String>::new()),
        ]);
        let parsed = source.read().unwrap();
        let names: Vec<&str> = parsed.terms.iter().map(|(_, t)| t.term.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(source.origin(), "embedded");
    }
}
