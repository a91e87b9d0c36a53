#![forbid(unsafe_code)]

//! Detail lookup for the term modal.
//!
//! Resolves a name against the full store, ignoring whatever filter is
//! active, and derives what the detail view needs beyond the record.

use std::collections::HashSet;

use tracing::debug;

use crate::config::GlossaryConfig;
use crate::store::TermStore;
use crate::term::TermRecord;

/// A resolved term plus the derived presentation facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDetail<'a> {
    pub record: &'a TermRecord,
    /// Badge color (palette color, or the fallback for unknown categories).
    pub color: &'a str,
    /// Whether the diagrams page has something about this term.
    pub has_diagram: bool,
}

/// Case-insensitive lookup over a store with a diagram cross-reference set.
#[derive(Debug, Clone)]
pub struct DetailLookup<'a> {
    store: &'a TermStore,
    config: &'a GlossaryConfig,
    diagram_terms: HashSet<String>,
}

impl<'a> DetailLookup<'a> {
    #[must_use]
    pub fn new(store: &'a TermStore, config: &'a GlossaryConfig) -> Self {
        let diagram_terms = config
            .diagram_terms
            .iter()
            .map(|name| name.trim().to_lowercase())
            .collect();
        Self {
            store,
            config,
            diagram_terms,
        }
    }

    /// Resolve `name`; `None` when no record has that name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TermDetail<'a>> {
        let store: &'a TermStore = self.store;
        let config: &'a GlossaryConfig = self.config;
        let Some(record) = store.find_by_name(name) else {
            debug!(name, "term lookup miss");
            return None;
        };
        Some(TermDetail {
            record,
            color: config.color_for(record.known_category()),
            has_diagram: self.has_diagram(&record.name),
        })
    }

    #[must_use]
    pub fn has_diagram(&self, name: &str) -> bool {
        self.diagram_terms.contains(&name.trim().to_lowercase())
    }
}
