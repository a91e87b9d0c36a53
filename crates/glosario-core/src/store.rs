#![forbid(unsafe_code)]

//! The immutable term collection for a session.
//!
//! Loading maps the external field names onto [`TermRecord`], assigns dense
//! [`TermId`]s in source order, and reports (never silently drops) anything
//! unusual: unreadable entries, blank names, categories outside the
//! enumeration, and case-insensitive duplicate names.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info_span, warn};

use crate::category::Category;
use crate::source::{ParsedTerms, TermSource};
use crate::term::{CategoryTag, RawTerm, TermId, TermRecord};

/// Errors that prevent a store from being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The document is not valid JSON.
    Json(String),
    /// The top-level JSON value is not an array.
    NotAnArray,
    /// Strict loading found a category outside the enumeration.
    UnknownCategory { term: String, label: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "terms document is not valid JSON: {msg}"),
            Self::NotAnArray => f.write_str("terms document must be a JSON array"),
            Self::UnknownCategory { term, label } => {
                write!(f, "term {term:?} has unknown category {label:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Something noteworthy found while loading. None of these abort a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    /// Entry at `index` could not be read as a term object.
    Malformed { index: usize, reason: String },
    /// Entry at `index` has an empty or blank name and was skipped.
    MissingName { index: usize },
    /// Record kept, but excluded from category grouping.
    UnknownCategory { id: TermId, label: String },
    /// Record kept; lookups by name resolve to `first`.
    DuplicateName { id: TermId, first: TermId },
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { index, reason } => write!(f, "entry {index} skipped: {reason}"),
            Self::MissingName { index } => write!(f, "entry {index} skipped: empty term name"),
            Self::UnknownCategory { id, label } => {
                write!(f, "term {id} has unknown category {label:?}")
            }
            Self::DuplicateName { id, first } => {
                write!(f, "term {id} duplicates the name of term {first}")
            }
        }
    }
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub issues: Vec<LoadIssue>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Loader switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject the whole document when a category is outside the enumeration.
    pub strict_categories: bool,
}

impl LoadOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_categories: true,
        }
    }
}

/// Immutable, ordered term collection.
#[derive(Debug, Clone, Default)]
pub struct TermStore {
    terms: Vec<TermRecord>,
    /// Lower-cased name -> first record with that name.
    by_name: HashMap<String, TermId>,
}

impl TermStore {
    /// Build a store from a source.
    ///
    /// # Errors
    /// Propagates source errors; see [`TermStore::load_parsed`] for the rest.
    pub fn from_source(
        source: &dyn TermSource,
        options: LoadOptions,
    ) -> Result<(Self, LoadReport), StoreError> {
        let _span = info_span!("term_store_load", origin = source.origin()).entered();
        let parsed = source.read()?;
        Self::load_parsed(parsed, options)
    }

    /// Build a store from in-memory records.
    ///
    /// # Errors
    /// See [`TermStore::load_parsed`].
    pub fn load(
        raw: impl IntoIterator<Item = RawTerm>,
        options: LoadOptions,
    ) -> Result<(Self, LoadReport), StoreError> {
        Self::load_parsed(ParsedTerms::from_records(raw), options)
    }

    /// Map parsed records into the store.
    ///
    /// # Errors
    /// [`StoreError::UnknownCategory`] in strict mode only.
    pub fn load_parsed(
        parsed: ParsedTerms,
        options: LoadOptions,
    ) -> Result<(Self, LoadReport), StoreError> {
        let mut report = LoadReport::default();
        for (index, reason) in parsed.malformed {
            report.issues.push(LoadIssue::Malformed { index, reason });
        }

        let mut store = Self::default();
        for (index, raw) in parsed.terms {
            let name = raw.term.trim();
            if name.is_empty() {
                report.issues.push(LoadIssue::MissingName { index });
                continue;
            }

            let id = TermId(store.terms.len() as u32);
            let category = CategoryTag::parse(raw.category.trim());
            if let CategoryTag::Unknown(label) = &category {
                if options.strict_categories {
                    return Err(StoreError::UnknownCategory {
                        term: name.to_owned(),
                        label: label.clone(),
                    });
                }
                report.issues.push(LoadIssue::UnknownCategory {
                    id,
                    label: label.clone(),
                });
            }

            let key = name.to_lowercase();
            match store.by_name.get(&key) {
                Some(&first) => report.issues.push(LoadIssue::DuplicateName { id, first }),
                None => {
                    store.by_name.insert(key, id);
                }
            }

            store.terms.push(TermRecord {
                id,
                name: name.to_owned(),
                category,
                description: raw.description,
                examples: raw.examples,
            });
        }

        report.loaded = store.terms.len();
        for issue in &report.issues {
            warn!(%issue, "term store load issue");
        }
        debug!(
            loaded = report.loaded,
            issues = report.issues.len(),
            "term store loaded"
        );
        Ok((store, report))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermRecord> {
        self.terms.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TermRecord] {
        &self.terms
    }

    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&TermRecord> {
        self.terms.get(id.index())
    }

    /// Number of categories shown in the stats header.
    #[must_use]
    pub const fn category_count(&self) -> usize {
        Category::ALL.len()
    }

    /// Case-insensitive exact lookup over the full store.
    ///
    /// Surrounding whitespace in `name` is ignored, matching how names are
    /// stored.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&TermRecord> {
        let key = name.trim().to_lowercase();
        self.by_name.get(&key).and_then(|id| self.get(*id))
    }
}

impl<'a> IntoIterator for &'a TermStore {
    type Item = &'a TermRecord;
    type IntoIter = std::slice::Iter<'a, TermRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
