#![forbid(unsafe_code)]

//! Structured view models for the glossary page.
//!
//! Everything here is plain owned data built from core results. Text fields
//! are raw (unescaped); the [`html`](crate::html) adapter is the only place
//! that turns them into markup.

use std::collections::HashSet;

use glosario_core::{
    Category, CategoryFilter, FilterOutcome, GlossaryConfig, HighlightedText, Highlighter,
    TermDetail, TermId, TermRecord,
};

// ---------------------------------------------------------------------------
// Expand state
// ---------------------------------------------------------------------------

/// Which entries are expanded. Entries toggle independently and keep their
/// state across filter changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    open: HashSet<TermId>,
}

impl ExpandState {
    #[must_use]
    pub fn is_expanded(&self, id: TermId) -> bool {
        self.open.contains(&id)
    }

    /// Flip one entry and return its new state.
    pub fn toggle(&mut self, id: TermId) -> bool {
        if self.open.remove(&id) {
            false
        } else {
            self.open.insert(id);
            true
        }
    }

    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.open.len()
    }
}

/// Minimal update for a single toggled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EntryPatch {
    pub id: TermId,
    pub expanded: bool,
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

/// One term card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: TermId,
    pub name: HighlightedText,
    pub category: Category,
    pub description: HighlightedText,
    pub examples: Vec<HighlightedText>,
    pub expanded: bool,
}

/// A category header plus its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub category: Category,
    pub color: String,
    pub count: usize,
    pub entries: Vec<EntryView>,
}

impl SectionView {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}

/// What the main list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlossaryView {
    /// Data has not arrived yet.
    Loading { message: String },
    /// Data failed to load; terminal.
    Failed { message: String },
    /// Data loaded but nothing matches the active filter.
    Empty { message: String },
    Sections(Vec<SectionView>),
}

impl GlossaryView {
    /// Number of cards shown.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        match self {
            Self::Sections(sections) => sections.iter().map(|s| s.entries.len()).sum(),
            _ => 0,
        }
    }
}

/// Build one card.
#[must_use]
pub fn render_entry(
    term: &TermRecord,
    category: Category,
    highlighter: &Highlighter,
    expanded: &ExpandState,
) -> EntryView {
    EntryView {
        id: term.id,
        name: highlighter.highlight(&term.name),
        category,
        description: highlighter.highlight(&term.description),
        examples: term
            .examples
            .iter()
            .map(|ex| highlighter.highlight(ex))
            .collect(),
        expanded: expanded.is_expanded(term.id),
    }
}

/// Build the list area from a filter pass.
#[must_use]
pub fn render(
    outcome: &FilterOutcome<'_>,
    highlighter: &Highlighter,
    config: &GlossaryConfig,
    expanded: &ExpandState,
) -> GlossaryView {
    let Some(grouped) = outcome.grouped() else {
        return GlossaryView::Empty {
            message: config.labels.no_results.clone(),
        };
    };

    let sections = grouped
        .groups()
        .iter()
        .map(|group| SectionView {
            category: group.category,
            color: config.color_for(Some(group.category)).to_owned(),
            count: group.len(),
            entries: group
                .terms
                .iter()
                .map(|term| render_entry(term, group.category, highlighter, expanded))
                .collect(),
        })
        .collect();
    GlossaryView::Sections(sections)
}

// ---------------------------------------------------------------------------
// Selector, stats, detail
// ---------------------------------------------------------------------------

/// One category selector button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabView {
    pub filter: CategoryFilter,
    pub active: bool,
}

impl TabView {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.filter.label()
    }
}

/// Selector buttons in order; exactly one is active.
#[must_use]
pub fn render_tabs(active: CategoryFilter) -> Vec<TabView> {
    CategoryFilter::options()
        .into_iter()
        .map(|filter| TabView {
            filter,
            active: filter == active,
        })
        .collect()
}

/// Header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StatsView {
    pub total_terms: usize,
    pub categories: usize,
}

/// Modal content for one term. No highlighting: the modal shows the record
/// as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: TermId,
    pub name: String,
    pub category_label: String,
    pub color: String,
    pub description: String,
    pub examples: Vec<String>,
    pub has_diagram: bool,
}

impl From<&TermDetail<'_>> for DetailView {
    fn from(detail: &TermDetail<'_>) -> Self {
        let record = detail.record;
        Self {
            id: record.id,
            name: record.name.clone(),
            category_label: record.category.label().to_owned(),
            color: detail.color.to_owned(),
            description: record.description.clone(),
            examples: record.examples.clone(),
            has_diagram: detail.has_diagram,
        }
    }
}
