#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`GlossaryApp`].
//!
//! This module contains the logic shared between the wasm-bindgen exports
//! and native hosts/tests. No JS/WASM types here: inputs arrive as plain
//! strings and numbers, outputs leave as HTML strings and JSON.

use glosario_core::{
    CategoryFilter, ConfigError, FontAdjust, GlossaryConfig, JsonSource, LoadOptions,
    PreferenceStore, TermId, TermStore, load_font_scale, save_font_scale,
};
use glosario_view::{CloseReason, Effect, GlossaryApp, Msg, PageTab, html};
use tracing::{debug, warn};

/// Origin label for term data handed over by the host.
const HOST_ORIGIN: &str = "host";

/// Platform-independent glossary runner.
pub struct RunnerCore {
    app: GlossaryApp,
    prefs: Box<dyn PreferenceStore>,
    load_options: LoadOptions,
    /// Leaf effects not yet taken by the host.
    pending: Vec<Effect>,
}

impl RunnerCore {
    /// Build the app, restore the font preference, and queue the startup
    /// effects.
    #[must_use]
    pub fn new(config: GlossaryConfig, prefs: Box<dyn PreferenceStore>) -> Self {
        let font = load_font_scale(prefs.as_ref(), &config.font);
        let mut core = Self {
            app: GlossaryApp::with_font(config, font),
            prefs,
            load_options: LoadOptions::default(),
            pending: Vec::new(),
        };
        let effect = core.app.init();
        core.apply(effect);
        core
    }

    /// Like [`RunnerCore::new`], with an optional JSON config document.
    ///
    /// # Errors
    /// Parse or validation failure of the supplied config.
    pub fn from_config_json(
        config_json: Option<&str>,
        prefs: Box<dyn PreferenceStore>,
    ) -> Result<Self, ConfigError> {
        let config = match config_json {
            Some(json) => GlossaryConfig::from_json_str(json)?,
            None => GlossaryConfig::default(),
        };
        Ok(Self::new(config, prefs))
    }

    /// Reject records with categories outside the enumeration.
    pub fn set_strict_categories(&mut self, strict: bool) {
        self.load_options.strict_categories = strict;
    }

    fn dispatch(&mut self, msg: Msg) {
        let effect = self.app.update(msg);
        self.apply(effect);
    }

    fn apply(&mut self, effect: Effect) {
        for leaf in effect.flatten() {
            if matches!(leaf, Effect::ApplyFontScale { .. }) {
                save_font_scale(self.prefs.as_mut(), &self.app.config().font, self.app.font());
            }
            self.pending.push(leaf);
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Load term data from a JSON document. Returns `true` when the glossary
    /// is ready afterwards.
    pub fn load_json(&mut self, text: &str) -> bool {
        let source = JsonSource::new(HOST_ORIGIN, text);
        let result = TermStore::from_source(&source, self.load_options)
            .map(|(store, _report)| store)
            .map_err(|err| err.to_string());
        self.dispatch(Msg::Loaded(result));
        self.is_ready()
    }

    /// Report that the host could not obtain the term data.
    pub fn load_failed(&mut self, message: &str) {
        self.dispatch(Msg::Loaded(Err(message.to_owned())));
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.app.store().is_some()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Select a category by its label (`"Todos"` for all). Unknown labels are
    /// ignored.
    pub fn select_category(&mut self, label: &str) -> bool {
        let Some(filter) = CategoryFilter::from_label(label) else {
            debug!(label, "ignoring unknown category label");
            return false;
        };
        self.dispatch(Msg::SelectCategory(filter));
        true
    }

    pub fn set_query(&mut self, text: &str) {
        self.dispatch(Msg::SetQuery(text.to_owned()));
    }

    pub fn toggle_entry(&mut self, id: u32) {
        self.dispatch(Msg::ToggleEntry(TermId(id)));
    }

    pub fn open_term(&mut self, name: &str) {
        self.dispatch(Msg::OpenTerm(name.to_owned()));
    }

    pub fn close_modal(&mut self, reason: &str) -> bool {
        let Some(reason) = CloseReason::from_name(reason) else {
            debug!(reason, "ignoring unknown close reason");
            return false;
        };
        self.dispatch(Msg::CloseModal(reason));
        true
    }

    pub fn show_diagrams(&mut self) {
        self.dispatch(Msg::ShowDiagrams);
    }

    pub fn switch_page(&mut self, name: &str) -> bool {
        let Some(page) = PageTab::from_name(name) else {
            debug!(name, "ignoring unknown page");
            return false;
        };
        self.dispatch(Msg::SwitchPage(page));
        true
    }

    /// `-1` smaller, `0` reset, `1` larger.
    pub fn adjust_font(&mut self, dir: i32) -> bool {
        let Some(adjust) = FontAdjust::from_direction(dir) else {
            debug!(dir, "ignoring unknown font direction");
            return false;
        };
        self.dispatch(Msg::AdjustFont(adjust));
        true
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn list_html(&self) -> String {
        html::list_html(&self.app.view(), &self.app.config().labels)
    }

    #[must_use]
    pub fn tabs_html(&self) -> String {
        html::tabs_html(&self.app.tabs())
    }

    /// Modal body, empty while the modal is closed.
    #[must_use]
    pub fn modal_html(&self) -> String {
        self.app
            .modal()
            .map(|detail| html::modal_html(&detail, &self.app.config().labels))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn stats_json(&self) -> String {
        to_json(&self.app.stats(), "{}")
    }

    #[must_use]
    pub fn font_percent(&self) -> u32 {
        self.app.font().percent()
    }

    #[must_use]
    pub fn font_step(&self) -> usize {
        self.app.font().step()
    }

    #[must_use]
    pub fn active_page(&self) -> &'static str {
        self.app.page().name()
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.app.is_modal_open()
    }

    #[must_use]
    pub fn total_terms(&self) -> usize {
        self.app.stats().total_terms
    }

    /// Drain pending effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    /// Drain pending effects as a JSON array.
    pub fn take_effects_json(&mut self) -> String {
        let effects = self.take_effects();
        to_json(&effects, "[]")
    }

    #[must_use]
    pub fn app(&self) -> &GlossaryApp {
        &self.app
    }
}

fn to_json<T: serde::Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        warn!(error = %err, "failed to encode runner output");
        fallback.to_owned()
    })
}

/// Console line for a panic raised inside the runner.
#[must_use]
pub fn panic_report(location: Option<&std::panic::Location<'_>>, message: &dyn std::fmt::Display) -> String {
    match location {
        Some(loc) => format!("glosario-web panic at {}:{}: {message}", loc.file(), loc.line()),
        None => format!("glosario-web panic: {message}"),
    }
}
