#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the GlossaryRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use glosario_core::{PreferenceStore, PrefsError};

use super::runner_core::{RunnerCore, panic_report};

fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            console_error(&panic_report(info.location(), info));
        }));
    });
}

/// Set one field of a snapshot object.
fn put(obj: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

fn describe_js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

// ---------------------------------------------------------------------------
// localStorage preferences
// ---------------------------------------------------------------------------

/// [`PreferenceStore`] over the page's `localStorage`.
///
/// Storage can be missing (privacy modes, sandboxed iframes); reads then
/// return nothing and writes report [`PrefsError::Unavailable`].
pub struct LocalStoragePreferences {
    storage: Option<web_sys::Storage>,
}

impl LocalStoragePreferences {
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }
}

impl Default for LocalStoragePreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| PrefsError::Unavailable("localStorage is not available".to_owned()))?;
        storage
            .set_item(key, value)
            .map_err(|err| PrefsError::Unavailable(describe_js_error(&err)))
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

async fn fetch_text(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| describe_js_error(&err))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_owned())?;
    if !response.ok() {
        return Err(format!("HTTP {} for {url}", response.status()));
    }
    let body = response.text().map_err(|err| describe_js_error(&err))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| describe_js_error(&err))?;
    text.as_string()
        .ok_or_else(|| "response body is not text".to_owned())
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

#[wasm_bindgen]
pub struct GlossaryRunner {
    inner: Rc<RefCell<RunnerCore>>,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl GlossaryRunner {
    /// Create the runner. `config_json` overrides the built-in palette,
    /// labels and font steps; an invalid config is rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GlossaryRunner, JsValue> {
        install_panic_hook();
        let prefs = Box::new(LocalStoragePreferences::new());
        let core = RunnerCore::from_config_json(config_json.as_deref(), prefs)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            inner: Rc::new(RefCell::new(core)),
        })
    }

    /// Reject records whose category is not one of the six known ones.
    #[wasm_bindgen(js_name = setStrictCategories)]
    pub fn set_strict_categories(&self, strict: bool) {
        self.inner.borrow_mut().set_strict_categories(strict);
    }

    /// Load term data already fetched by the host.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&self, text: &str) -> bool {
        self.inner.borrow_mut().load_json(text)
    }

    /// Report that the host could not obtain term data.
    #[wasm_bindgen(js_name = loadFailed)]
    pub fn load_failed(&self, message: &str) {
        self.inner.borrow_mut().load_failed(message);
    }

    /// Fetch term data from `url` and load it. Resolves to `true` when the
    /// glossary is ready; a failed fetch resolves to `false` after entering
    /// the failed state.
    #[wasm_bindgen(js_name = fetchTerms)]
    pub fn fetch_terms(&self, url: String) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        wasm_bindgen_futures::future_to_promise(async move {
            let ready = match fetch_text(&url).await {
                Ok(text) => inner.borrow_mut().load_json(&text),
                Err(reason) => {
                    console_error(&format!("glossary fetch failed: {reason}"));
                    inner.borrow_mut().load_failed(&reason);
                    false
                }
            };
            Ok(JsValue::from_bool(ready))
        })
    }

    #[wasm_bindgen(js_name = selectCategory)]
    pub fn select_category(&self, label: &str) -> bool {
        self.inner.borrow_mut().select_category(label)
    }

    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&self, text: &str) {
        self.inner.borrow_mut().set_query(text);
    }

    #[wasm_bindgen(js_name = toggleEntry)]
    pub fn toggle_entry(&self, id: u32) {
        self.inner.borrow_mut().toggle_entry(id);
    }

    #[wasm_bindgen(js_name = openTerm)]
    pub fn open_term(&self, name: &str) {
        self.inner.borrow_mut().open_term(name);
    }

    /// `reason`: `"close_button"`, `"backdrop"` or `"escape_key"`.
    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self, reason: &str) -> bool {
        self.inner.borrow_mut().close_modal(reason)
    }

    #[wasm_bindgen(js_name = showDiagrams)]
    pub fn show_diagrams(&self) {
        self.inner.borrow_mut().show_diagrams();
    }

    /// `name`: `"glossary"`, `"guide"`, `"diagrams"` or the matching
    /// `view-*` element id.
    #[wasm_bindgen(js_name = switchPage)]
    pub fn switch_page(&self, name: &str) -> bool {
        self.inner.borrow_mut().switch_page(name)
    }

    /// `dir`: `-1` smaller, `0` reset, `1` larger.
    #[wasm_bindgen(js_name = adjustFont)]
    pub fn adjust_font(&self, dir: i32) -> bool {
        self.inner.borrow_mut().adjust_font(dir)
    }

    #[wasm_bindgen(js_name = listHtml)]
    pub fn list_html(&self) -> String {
        self.inner.borrow().list_html()
    }

    #[wasm_bindgen(js_name = tabsHtml)]
    pub fn tabs_html(&self) -> String {
        self.inner.borrow().tabs_html()
    }

    #[wasm_bindgen(js_name = modalHtml)]
    pub fn modal_html(&self) -> String {
        self.inner.borrow().modal_html()
    }

    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> String {
        self.inner.borrow().stats_json()
    }

    #[wasm_bindgen(js_name = fontPercent)]
    pub fn font_percent(&self) -> u32 {
        self.inner.borrow().font_percent()
    }

    #[wasm_bindgen(js_name = activePage)]
    pub fn active_page(&self) -> String {
        self.inner.borrow().active_page().to_owned()
    }

    /// Drain pending effects as a JSON array of `{ "kind": ... }` objects.
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&self) -> String {
        self.inner.borrow_mut().take_effects_json()
    }

    /// Small status object for host-side debugging.
    pub fn snapshot(&self) -> JsValue {
        let core = self.inner.borrow();
        let obj = Object::new();
        put(&obj, "ready", core.is_ready());
        put(&obj, "totalTerms", core.total_terms() as f64);
        put(&obj, "activePage", core.active_page());
        put(&obj, "fontPercent", core.font_percent());
        put(&obj, "fontStep", core.font_step() as f64);
        put(&obj, "modalOpen", core.is_modal_open());
        obj.into()
    }
}
