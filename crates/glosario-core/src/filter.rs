#![forbid(unsafe_code)]

//! The filter engine: store + [`FilterState`] -> grouped result.
//!
//! A term passes when the category selector admits it and, for a non-empty
//! query, its name or description contains the query (literal,
//! case-insensitive). Passing terms are grouped by category in
//! [`Category::ALL`] order; each group keeps store order. Groups without
//! members are not emitted, and records whose category is outside the
//! enumeration are never emitted.
//!
//! Every call recomputes from scratch and borrows the store immutably, so it
//! is safe to run on each keystroke.

use tracing::trace;

use crate::category::{Category, CategoryFilter};
use crate::matcher::QueryMatcher;
use crate::store::TermStore;
use crate::term::TermRecord;

/// Current selector and search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterState {
    #[must_use]
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// True when neither predicate restricts anything.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.query.is_empty()
    }
}

/// Matching terms of one category, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermGroup<'a> {
    pub category: Category,
    pub terms: Vec<&'a TermRecord>,
}

impl TermGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Non-empty groups in enumeration order. Never itself empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedResult<'a> {
    groups: Vec<TermGroup<'a>>,
}

impl<'a> GroupedResult<'a> {
    #[must_use]
    pub fn groups(&self) -> &[TermGroup<'a>] {
        &self.groups
    }

    /// Total number of emitted terms.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.iter().map(TermGroup::len).sum()
    }

    /// All emitted terms, group by group.
    pub fn terms(&self) -> impl Iterator<Item = &'a TermRecord> + '_ {
        self.groups.iter().flat_map(|g| g.terms.iter().copied())
    }

    #[must_use]
    pub fn group(&self, category: Category) -> Option<&TermGroup<'a>> {
        self.groups.iter().find(|g| g.category == category)
    }
}

/// Result of a filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    /// Nothing to show; the view renders its dedicated empty state.
    NoResults,
    Groups(GroupedResult<'a>),
}

impl<'a> FilterOutcome<'a> {
    #[must_use]
    pub fn is_no_results(&self) -> bool {
        matches!(self, Self::NoResults)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            Self::NoResults => 0,
            Self::Groups(grouped) => grouped.total(),
        }
    }

    #[must_use]
    pub fn grouped(&self) -> Option<&GroupedResult<'a>> {
        match self {
            Self::NoResults => None,
            Self::Groups(grouped) => Some(grouped),
        }
    }
}

/// Whether a single record passes both predicates.
#[must_use]
pub fn term_matches(term: &TermRecord, category: CategoryFilter, matcher: &QueryMatcher) -> bool {
    category.admits(term.known_category())
        && (matcher.is_empty() || matcher.accepts(&term.name) || matcher.accepts(&term.description))
}

/// Filter the store with the given state.
#[must_use]
pub fn filter<'a>(store: &'a TermStore, state: &FilterState) -> FilterOutcome<'a> {
    filter_terms(store, state.category, &QueryMatcher::new(&state.query))
}

/// Filter with a pre-compiled matcher (lets callers reuse it for highlighting).
#[must_use]
pub fn filter_terms<'a>(
    terms: impl IntoIterator<Item = &'a TermRecord>,
    category: CategoryFilter,
    matcher: &QueryMatcher,
) -> FilterOutcome<'a> {
    let mut buckets: [Vec<&'a TermRecord>; Category::ALL.len()] = Default::default();
    let mut unlisted = 0usize;

    for term in terms {
        if !term_matches(term, category, matcher) {
            continue;
        }
        match term.known_category() {
            Some(cat) => buckets[cat.index()].push(term),
            None => unlisted += 1,
        }
    }

    let groups: Vec<TermGroup<'a>> = Category::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, terms)| !terms.is_empty())
        .map(|(category, terms)| TermGroup { category, terms })
        .collect();

    trace!(
        category = %category,
        query = matcher.query(),
        groups = groups.len(),
        unlisted,
        "filter pass"
    );

    if groups.is_empty() {
        FilterOutcome::NoResults
    } else {
        FilterOutcome::Groups(GroupedResult { groups })
    }
}
