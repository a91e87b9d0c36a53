#![forbid(unsafe_code)]

//! The glossary page as an Elm-style model.
//!
//! [`GlossaryApp::update`] takes one [`Msg`] from the host, applies the state
//! transition, and returns an [`Effect`] describing what the host has to
//! redraw. Rendering is pull-based: after an effect the host asks for the
//! current [`GlossaryView`], tabs, stats or modal content.
//!
//! # State
//!
//! | State     | List area shows                 | Leaves via            |
//! |-----------|---------------------------------|-----------------------|
//! | `Loading` | loading label                   | `Msg::Loaded`         |
//! | `Ready`   | sections or the no-results text | never                 |
//! | `Failed`  | load-failed label               | never (no retry)      |

use serde::Serialize;
use tracing::{debug, info, warn};

use glosario_core::{
    CategoryFilter, DetailLookup, FilterState, FontAdjust, FontScale, GlossaryConfig,
    Highlighter, QueryMatcher, TermId, TermStore, filter_terms,
};

use crate::view::{
    DetailView, EntryPatch, ExpandState, GlossaryView, StatsView, TabView, render, render_tabs,
};

// ---------------------------------------------------------------------------
// Messages and effects
// ---------------------------------------------------------------------------

/// How the modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    EscapeKey,
}

impl CloseReason {
    /// Parse the host's name for a close reason.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "close_button" | "button" => Some(Self::CloseButton),
            "backdrop" => Some(Self::Backdrop),
            "escape_key" | "escape" | "Escape" => Some(Self::EscapeKey),
            _ => None,
        }
    }
}

/// Top-level page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageTab {
    #[default]
    Glossary,
    Guide,
    Diagrams,
}

impl PageTab {
    pub const ALL: [Self; 3] = [Self::Glossary, Self::Guide, Self::Diagrams];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Glossary => "glossary",
            Self::Guide => "guide",
            Self::Diagrams => "diagrams",
        }
    }

    /// Id of the page element (`view-glossary`, ...).
    #[must_use]
    pub const fn view_id(self) -> &'static str {
        match self {
            Self::Glossary => "view-glossary",
            Self::Guide => "view-guide",
            Self::Diagrams => "view-diagrams",
        }
    }

    /// Accepts either the short name or the element id.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.name() == name || tab.view_id() == name)
    }
}

/// Input to [`GlossaryApp::update`].
#[derive(Debug, Clone)]
pub enum Msg {
    /// Term data arrived, or failed to.
    Loaded(Result<TermStore, String>),
    SelectCategory(CategoryFilter),
    SetQuery(String),
    ToggleEntry(TermId),
    /// Open the modal for a term by name (from a card or a guide link).
    OpenTerm(String),
    CloseModal(CloseReason),
    /// The modal's diagram button.
    ShowDiagrams,
    SwitchPage(PageTab),
    AdjustFont(FontAdjust),
}

/// What the host has to apply after an update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Nothing changed.
    #[default]
    None,
    /// Several effects, applied in order. Never serialized directly; see
    /// [`Effect::flatten`].
    #[serde(skip)]
    Batch(Vec<Effect>),
    /// Replace the list area with the current [`GlossaryView`].
    RenderList,
    /// Replace the category selector.
    RenderTabs,
    /// Refresh the header counters.
    UpdateStats,
    /// Flip a single card.
    PatchEntry(EntryPatch),
    ShowModal,
    HideModal,
    SwitchPage { page: PageTab },
    ScrollToTop,
    /// Set the root font size and persist the step.
    ApplyFontScale { percent: u32, step: usize },
}

impl Effect {
    /// Combine effects, dropping no-ops.
    #[must_use]
    pub fn batch(effects: Vec<Self>) -> Self {
        let mut effects: Vec<Self> = effects.into_iter().filter(|e| !e.is_none()).collect();
        match effects.len() {
            0 => Self::None,
            1 => effects.pop().unwrap_or_default(),
            _ => Self::Batch(effects),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Leaf effects in application order.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(effects) => effects.into_iter().flat_map(Self::flatten).collect(),
            leaf => vec![leaf],
        }
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Data lifecycle.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(TermStore),
    /// Terminal; carries the underlying reason for logs.
    Failed(String),
}

/// The whole page state.
#[derive(Debug, Clone)]
pub struct GlossaryApp {
    config: GlossaryConfig,
    state: LoadState,
    filter: FilterState,
    matcher: QueryMatcher,
    expanded: ExpandState,
    modal: Option<TermId>,
    page: PageTab,
    font: FontScale,
}

impl GlossaryApp {
    /// New app in the `Loading` state with the default font step.
    #[must_use]
    pub fn new(config: GlossaryConfig) -> Self {
        let font = FontScale::new(&config.font);
        Self::with_font(config, font)
    }

    /// New app starting from a restored font scale.
    #[must_use]
    pub fn with_font(config: GlossaryConfig, font: FontScale) -> Self {
        Self {
            config,
            state: LoadState::Loading,
            filter: FilterState::default(),
            matcher: QueryMatcher::default(),
            expanded: ExpandState::default(),
            modal: None,
            page: PageTab::default(),
            font,
        }
    }

    /// Startup effects: font size, selector, and the list area.
    pub fn init(&mut self) -> Effect {
        Effect::batch(vec![
            self.font_effect(),
            Effect::RenderTabs,
            Effect::RenderList,
        ])
    }

    /// Apply one message.
    pub fn update(&mut self, msg: Msg) -> Effect {
        match msg {
            Msg::Loaded(result) => self.on_loaded(result),
            Msg::SelectCategory(category) => {
                if self.filter.category == category {
                    return Effect::None;
                }
                debug!(category = %category, "category selected");
                self.filter.category = category;
                Effect::batch(vec![Effect::RenderTabs, Effect::RenderList])
            }
            Msg::SetQuery(query) => {
                if self.filter.query == query {
                    return Effect::None;
                }
                self.matcher = QueryMatcher::new(&query);
                self.filter.query = query;
                Effect::RenderList
            }
            Msg::ToggleEntry(id) => self.on_toggle(id),
            Msg::OpenTerm(name) => self.on_open(&name),
            Msg::CloseModal(reason) => {
                if self.modal.take().is_some() {
                    debug!(?reason, "modal closed");
                    Effect::HideModal
                } else {
                    Effect::None
                }
            }
            Msg::ShowDiagrams => {
                let hide = if self.modal.take().is_some() {
                    Effect::HideModal
                } else {
                    Effect::None
                };
                self.page = PageTab::Diagrams;
                Effect::batch(vec![
                    hide,
                    Effect::SwitchPage {
                        page: PageTab::Diagrams,
                    },
                    Effect::ScrollToTop,
                ])
            }
            Msg::SwitchPage(page) => {
                if self.page == page {
                    return Effect::None;
                }
                self.page = page;
                Effect::SwitchPage { page }
            }
            Msg::AdjustFont(adjust) => {
                self.font.adjust(adjust);
                self.font_effect()
            }
        }
    }

    fn on_loaded(&mut self, result: Result<TermStore, String>) -> Effect {
        if !matches!(self.state, LoadState::Loading) {
            warn!("ignoring term data after the initial load");
            return Effect::None;
        }
        match result {
            Ok(store) => {
                info!(terms = store.len(), "glossary ready");
                self.state = LoadState::Ready(store);
                Effect::batch(vec![Effect::UpdateStats, Effect::RenderList])
            }
            Err(reason) => {
                warn!(%reason, "glossary failed to load");
                self.state = LoadState::Failed(reason);
                Effect::RenderList
            }
        }
    }

    fn on_toggle(&mut self, id: TermId) -> Effect {
        let known = self.store().is_some_and(|store| store.get(id).is_some());
        if !known {
            debug!(%id, "toggle for unknown entry");
            return Effect::None;
        }
        let expanded = self.expanded.toggle(id);
        Effect::PatchEntry(EntryPatch { id, expanded })
    }

    fn on_open(&mut self, name: &str) -> Effect {
        let Some(store) = self.store() else {
            debug!(name, "term requested before data is ready");
            return Effect::None;
        };
        let Some(id) = DetailLookup::new(store, &self.config)
            .find(name)
            .map(|detail| detail.record.id)
        else {
            return Effect::None;
        };
        self.modal = Some(id);
        Effect::ShowModal
    }

    fn font_effect(&self) -> Effect {
        Effect::ApplyFontScale {
            percent: self.font.percent(),
            step: self.font.step(),
        }
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Current list area.
    #[must_use]
    pub fn view(&self) -> GlossaryView {
        match &self.state {
            LoadState::Loading => GlossaryView::Loading {
                message: self.config.labels.loading.clone(),
            },
            LoadState::Failed(_) => GlossaryView::Failed {
                message: self.config.labels.load_failed.clone(),
            },
            LoadState::Ready(store) => {
                let outcome = filter_terms(store, self.filter.category, &self.matcher);
                let highlighter = Highlighter::with_matcher(self.matcher.clone());
                render(&outcome, &highlighter, &self.config, &self.expanded)
            }
        }
    }

    #[must_use]
    pub fn tabs(&self) -> Vec<TabView> {
        render_tabs(self.filter.category)
    }

    /// Header counters; zero terms until loaded.
    #[must_use]
    pub fn stats(&self) -> StatsView {
        let (total_terms, categories) = match self.store() {
            Some(store) => (store.len(), store.category_count()),
            None => (0, 0),
        };
        StatsView {
            total_terms,
            categories,
        }
    }

    /// Modal content, `None` while closed.
    #[must_use]
    pub fn modal(&self) -> Option<DetailView> {
        let id = self.modal?;
        let store = self.store()?;
        let record = store.get(id)?;
        DetailLookup::new(store, &self.config)
            .find(&record.name)
            .map(|detail| DetailView::from(&detail))
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    #[must_use]
    pub fn store(&self) -> Option<&TermStore> {
        match &self.state {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn expanded(&self) -> &ExpandState {
        &self.expanded
    }

    #[must_use]
    pub fn page(&self) -> PageTab {
        self.page
    }

    #[must_use]
    pub fn font(&self) -> &FontScale {
        &self.font
    }

    #[must_use]
    pub fn config(&self) -> &GlossaryConfig {
        &self.config
    }
}
