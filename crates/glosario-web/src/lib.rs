#![forbid(unsafe_code)]

//! WASM runner for the Glosario glossary page.
//!
//! This crate provides [`GlossaryRunner`](wasm::GlossaryRunner), a
//! `wasm-bindgen`-exported struct that wraps
//! [`glosario_view::GlossaryApp`] and exposes it to JavaScript. The host owns
//! the DOM: it forwards clicks and keystrokes as method calls, drains
//! `takeEffects()`, and writes the returned HTML where each effect says.
//!
//! [`RunnerCore`] holds all the logic and compiles everywhere, so native
//! hosts and tests drive exactly what the browser drives.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{GlossaryRunner, LocalStoragePreferences};

pub mod runner_core;

pub use runner_core::{RunnerCore, panic_report};

#[cfg(test)]
mod tests {
    use crate::runner_core::{RunnerCore, panic_report};
    use glosario_core::{MemoryPreferences, PreferenceStore, PrefsError};
    use glosario_view::Effect;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    const TERMS_JSON: &str = r#"[
      {"term": "Activo", "category": "Contable", "description": "Recursos controlados", "examples": ["Caja"]},
      {"term": "Acta", "category": "Legal", "description": "Documento firmado"},
      {"term": "Arancel", "category": "Aduanero", "description": "Tarifa"}
    ]"#;

    fn core() -> RunnerCore {
        RunnerCore::new(Default::default(), Box::new(MemoryPreferences::new()))
    }

    fn ready_core() -> RunnerCore {
        let mut core = core();
        assert!(core.load_json(TERMS_JSON));
        core.take_effects();
        core
    }

    fn kinds(json: &str) -> Vec<String> {
        let value: serde_json::Value = serde_json::from_str(json).expect("effects json");
        value
            .as_array()
            .expect("effects array")
            .iter()
            .map(|e| e["kind"].as_str().expect("kind").to_owned())
            .collect()
    }

    /// Preference store that always fails to write.
    struct ReadOnlyPrefs;

    impl PreferenceStore for ReadOnlyPrefs {
        fn get(&self, _key: &str) -> Option<String> {
            Some("4".to_owned())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PrefsError> {
            Err(PrefsError::Unavailable("read-only".to_owned()))
        }
    }

    #[test]
    fn runner_core_startup_effects() {
        let mut core = core();
        assert_eq!(
            kinds(&core.take_effects_json()),
            vec!["apply_font_scale", "render_tabs", "render_list"]
        );
        assert_eq!(core.take_effects_json(), "[]");
        assert!(core.list_html().contains("Cargando términos…"));
        assert_eq!(core.stats_json(), r#"{"total_terms":0,"categories":0}"#);
    }

    #[test]
    fn runner_core_load_json() {
        let mut core = core();
        core.take_effects();
        assert!(core.load_json(TERMS_JSON));
        assert_eq!(
            core.take_effects(),
            vec![Effect::UpdateStats, Effect::RenderList]
        );
        assert_eq!(core.stats_json(), r#"{"total_terms":3,"categories":6}"#);
        assert!(core.list_html().contains("data-term-id=\"0\""));
    }

    #[test]
    fn runner_core_malformed_document_fails() {
        let mut core = core();
        assert!(!core.load_json("{\"term\": \"Activo\"}"));
        assert!(core.list_html().contains("No se pudieron cargar los términos."));
        assert!(!core.load_json(TERMS_JSON), "failure is terminal");
    }

    #[test]
    fn runner_core_strict_categories_reject_unknown() {
        let mut core = core();
        core.set_strict_categories(true);
        assert!(!core.load_json(TERMS_JSON));
        assert!(!core.is_ready());
    }

    #[test]
    fn runner_core_load_failed() {
        let mut core = core();
        core.load_failed("HTTP 404");
        assert!(core.list_html().starts_with("<div class=\"load-error\">"));
    }

    #[test]
    fn runner_core_unknown_inputs_are_ignored() {
        let mut core = ready_core();
        assert!(!core.select_category("Aduanero"));
        assert!(!core.switch_page("home"));
        assert!(!core.adjust_font(3));
        assert!(!core.close_modal("swipe"));
        assert_eq!(core.take_effects_json(), "[]");
    }

    #[test]
    fn runner_core_filter_and_toggle() {
        let mut core = ready_core();
        assert!(core.select_category("Legal"));
        assert_eq!(kinds(&core.take_effects_json()), vec!["render_tabs", "render_list"]);
        assert!(core.tabs_html().contains("<button class=\"tab active\" data-cat=\"Legal\">"));
        assert!(!core.list_html().contains("Activo"));

        core.set_query("firm");
        assert_eq!(kinds(&core.take_effects_json()), vec!["render_list"]);
        assert!(core.list_html().contains(">firm</mark>ado"));

        core.toggle_entry(1);
        assert_eq!(
            core.take_effects_json(),
            r#"[{"kind":"patch_entry","id":1,"expanded":true}]"#
        );
    }

    #[test]
    fn runner_core_modal_flow() {
        let mut core = ready_core();
        core.open_term("Nonexistent Term");
        assert_eq!(core.modal_html(), "");
        assert_eq!(core.take_effects_json(), "[]");

        core.open_term("activo");
        assert!(core.modal_html().contains("<div class=\"modal-term-name\">Activo</div>"));
        assert!(core.close_modal("escape_key"));
        assert_eq!(kinds(&core.take_effects_json()), vec!["show_modal", "hide_modal"]);
        assert_eq!(core.modal_html(), "");

        core.open_term("Activo");
        core.show_diagrams();
        assert_eq!(core.active_page(), "diagrams");
        assert_eq!(
            kinds(&core.take_effects_json()),
            vec!["show_modal", "hide_modal", "switch_page", "scroll_to_top"]
        );
    }

    #[test]
    fn runner_core_font_is_persisted() {
        let mut core = core();
        core.take_effects();
        assert!(core.adjust_font(1));
        assert!(core.adjust_font(1));
        assert_eq!(core.font_percent(), 125);
        assert_eq!(
            core.take_effects_json(),
            r#"[{"kind":"apply_font_scale","percent":110,"step":3},{"kind":"apply_font_scale","percent":125,"step":4}]"#
        );
        assert!(core.adjust_font(0));
        assert_eq!(core.font_percent(), 100);
    }

    #[test]
    fn runner_core_restores_stored_font_step() {
        let prefs = MemoryPreferences::new().with("glossary-font-step", "0");
        let core = RunnerCore::new(Default::default(), Box::new(prefs));
        assert_eq!(core.font_percent(), 80);
    }

    #[test]
    #[traced_test]
    fn runner_core_write_failure_is_logged_not_fatal() {
        let mut core = RunnerCore::new(Default::default(), Box::new(ReadOnlyPrefs));
        assert_eq!(core.font_step(), 4);
        assert!(core.adjust_font(-1));
        assert_eq!(core.font_step(), 3);
        assert!(logs_contain("failed to persist font step"));
    }

    #[test]
    fn panic_report_names_the_crate_and_location() {
        let loc = std::panic::Location::caller();
        let line = panic_report(Some(loc), &"index out of bounds");
        assert_eq!(
            line,
            format!("glosario-web panic at {}:{}: index out of bounds", loc.file(), loc.line())
        );
        assert_eq!(panic_report(None, &"boom"), "glosario-web panic: boom");
    }

    #[test]
    fn runner_core_config_json() {
        let core = RunnerCore::from_config_json(
            Some(r#"{"labels": {"loading": "Loading terms"}}"#),
            Box::new(MemoryPreferences::new()),
        )
        .expect("valid config");
        assert!(core.list_html().contains("Loading terms"));

        let err = RunnerCore::from_config_json(
            Some(r#"{"palette": {"Legal": "purple"}}"#),
            Box::new(MemoryPreferences::new()),
        );
        assert!(err.is_err());
    }
}
