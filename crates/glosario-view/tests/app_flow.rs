#![forbid(unsafe_code)]

//! Page-level flows: load, filter, expand, modal, navigation, and the markup
//! the host receives at each step.

use glosario_core::{
    Category, CategoryFilter, FontAdjust, FontScale, GlossaryConfig, JsonSource, LoadOptions,
    TermId, TermStore,
};
use glosario_view::{
    CloseReason, Effect, GlossaryApp, GlossaryView, MARK_STYLE, Msg, PageTab, list_html,
    modal_html, tabs_html,
};
use pretty_assertions::assert_eq;

const TERMS_JSON: &str = r#"[
  {"term": "Activo", "category": "Contable", "description": "Recursos controlados", "examples": ["Caja"]},
  {"term": "Acta", "category": "Legal", "description": "Documento <firmado> por socios", "examples": []},
  {"term": "IVA", "category": "Fiscal", "description": "Impuesto <script>alert(1)</script>"},
  {"term": "Arancel", "category": "Aduanero", "description": "Tarifa"}
]"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn loaded_app() -> GlossaryApp {
    init_tracing();
    let source = JsonSource::new("terms.json", TERMS_JSON);
    let (store, report) = TermStore::from_source(&source, LoadOptions::default()).unwrap();
    assert_eq!(report.issues.len(), 1);
    let mut app = GlossaryApp::new(GlossaryConfig::default());
    app.init();
    app.update(Msg::Loaded(Ok(store)));
    app
}

fn list(app: &GlossaryApp) -> String {
    list_html(&app.view(), &app.config().labels)
}

#[test]
fn unfiltered_list_groups_and_escapes() {
    let app = loaded_app();
    let html = list(&app);
    let legal = html.find("Legal <span class=\"count-badge\">1</span>").unwrap();
    let contable = html.find("Contable <span class=\"count-badge\">1</span>").unwrap();
    let fiscal = html.find("Fiscal <span class=\"count-badge\">1</span>").unwrap();
    assert!(legal < contable && contable < fiscal);
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<firmado>"));
    assert!(!html.contains("Arancel"), "unknown categories are not listed");
    assert_eq!(app.stats().total_terms, 4);
}

#[test]
fn lt_query_highlights_whole_entity() {
    let mut app = loaded_app();
    assert_eq!(app.update(Msg::SetQuery("<".into())), Effect::RenderList);
    let html = list(&app);
    assert!(html.contains(&format!("Documento <mark style=\"{MARK_STYLE}\">&lt;</mark>firmado")));
    assert!(!html.contains("&<mark"));
    assert_eq!(app.view().entry_count(), 2);
}

#[test]
fn category_selection_updates_tabs_and_list() {
    let mut app = loaded_app();
    app.update(Msg::SelectCategory(CategoryFilter::Only(Category::Laboral)));
    assert_eq!(
        list(&app),
        "<div class=\"no-results\">🔍 No se encontraron términos. Intentá con otra búsqueda.</div>"
    );
    let tabs = tabs_html(&app.tabs());
    assert!(tabs.contains("<button class=\"tab active\" data-cat=\"Laboral\">Laboral</button>"));
    assert!(tabs.contains("<button class=\"tab\" data-cat=\"Todos\">Todos</button>"));
}

#[test]
fn expanded_card_is_marked_open() {
    let mut app = loaded_app();
    app.update(Msg::ToggleEntry(TermId(1)));
    assert!(list(&app).contains("<div class=\"card cat-Legal open\" data-term-id=\"1\">"));
    app.update(Msg::ToggleEntry(TermId(1)));
    assert!(list(&app).contains("<div class=\"card cat-Legal\" data-term-id=\"1\">"));
}

#[test]
fn modal_for_unknown_category_uses_fallback_color() {
    let mut app = loaded_app();
    assert_eq!(app.update(Msg::OpenTerm("arancel".into())), Effect::ShowModal);
    let detail = app.modal().unwrap();
    let html = modal_html(&detail, &app.config().labels);
    assert!(html.contains("style=\"background:#64748b\">Aduanero</span>"));
    assert!(!html.contains("modal-diagram-btn"));
    assert_eq!(
        app.update(Msg::CloseModal(CloseReason::CloseButton)),
        Effect::HideModal
    );
    assert!(app.modal().is_none());
}

#[test]
fn diagram_button_navigates() {
    let mut app = loaded_app();
    app.update(Msg::OpenTerm("Activo".into()));
    let html = modal_html(&app.modal().unwrap(), &app.config().labels);
    assert!(html.contains("<div class=\"modal-examples\"><h4>📌 Ejemplos prácticos</h4>"));
    assert!(html.contains("data-action=\"show-diagrams\""));

    let effects = app.update(Msg::ShowDiagrams).flatten();
    assert_eq!(effects.len(), 3);
    assert_eq!(app.page(), PageTab::Diagrams);
    assert!(!app.is_modal_open());
}

#[test]
fn restored_font_scale_drives_init() {
    let config = GlossaryConfig::default();
    let font = FontScale::from_stored(&config.font, Some("5"));
    let mut app = GlossaryApp::with_font(config, font);
    assert_eq!(
        app.init().flatten()[0],
        Effect::ApplyFontScale {
            percent: 140,
            step: 5
        }
    );
    app.update(Msg::AdjustFont(FontAdjust::Larger));
    assert_eq!(app.font().step(), 5);
}

#[test]
fn loading_view_before_data() {
    init_tracing();
    let app = GlossaryApp::new(GlossaryConfig::default());
    assert!(matches!(app.view(), GlossaryView::Loading { .. }));
    assert_eq!(
        list_html(&app.view(), &app.config().labels),
        "<div class=\"loading\">Cargando términos…</div>"
    );
    assert_eq!(app.stats().total_terms, 0);
}
