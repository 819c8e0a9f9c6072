//! ManifestExplorer: the explorer exposed to JavaScript
//!
//! ```javascript
//! import init, { ManifestExplorer } from 'manifests';
//!
//! await init();
//! const explorer = new ManifestExplorer('https://api.example/', null);
//! explorer.onChange(snapshot => render(snapshot));
//! explorer.start();
//!
//! input.oninput = e => explorer.setDraft(e.target.value);
//! row.onclick = () => explorer.navigateInto(row.dataset.name);
//! ```

use super::browser::{BrowserHistory, BrowserPlatform};
use super::log;
use crate::backend::HttpBackend;
use crate::core::{FieldPath, SchemaCatalog};
use crate::explorer::{Explorer, ExplorerConfig};
use crate::history::NavigationIntent;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_value<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct ManifestExplorer {
    explorer: Explorer,
    popstate: RefCell<Option<Closure<dyn FnMut()>>>,
}

#[wasm_bindgen]
impl ManifestExplorer {
    /// `catalog_json`: `{"choices": [...], "default": "..."}`, built-in catalog when absent
    #[wasm_bindgen(constructor)]
    pub fn new(api_url: Option<String>, catalog_json: Option<String>) -> Result<ManifestExplorer, JsValue> {
        let mut config = ExplorerConfig::new();
        if let Some(url) = api_url {
            config = config.with_api_url(url);
        }
        if let Some(json) = catalog_json {
            config = config.with_catalog(SchemaCatalog::from_json(&json).map_err(to_js)?);
        }
        let backend = HttpBackend::new(&config.api_url).map_err(to_js)?;
        log!("[manifests] api {}", config.api_url);

        let explorer = Explorer::new(&config, Rc::new(backend), Rc::new(BrowserHistory), Rc::new(BrowserPlatform));
        Ok(Self { explorer, popstate: RefCell::new(None) })
    }

    /// Follow back/forward and resolve the current location
    #[wasm_bindgen]
    pub fn start(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if self.popstate.borrow().is_none() {
            let explorer = self.explorer.clone();
            let listener = Closure::<dyn FnMut()>::new(move || explorer.on_browser_navigated());
            window.add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())?;
            *self.popstate.borrow_mut() = Some(listener);
        }
        self.explorer.initialize_from_browser_location();
        log!("[manifests] started at {}", self.explorer.path());
        Ok(())
    }

    #[wasm_bindgen(js_name = "setSchemaVersion")]
    pub fn set_schema_version(&self, version: &str) -> Result<(), JsValue> {
        let version = self
            .explorer
            .catalog()
            .lookup(version)
            .cloned()
            .ok_or_else(|| JsValue::from_str(&format!("unknown schema version: {}", version)))?;
        self.explorer.set_schema_version(version, NavigationIntent::Sync);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setFieldPath")]
    pub fn set_field_path(&self, field_path: &str) {
        self.explorer.set_field_path(FieldPath::parse(field_path), NavigationIntent::Sync);
    }

    /// Empty string unpins
    #[wasm_bindgen(js_name = "setResourceVersion")]
    pub fn set_resource_version(&self, version: &str) {
        self.explorer.set_resource_version(Some(version.to_string()), NavigationIntent::Sync);
    }

    #[wasm_bindgen(js_name = "navigateInto")]
    pub fn navigate_into(&self, segment: &str) -> bool {
        self.explorer.navigate_into(segment)
    }

    #[wasm_bindgen(js_name = "setDraft")]
    pub fn set_draft(&self, text: &str) {
        self.explorer.set_draft(text);
    }

    #[wasm_bindgen]
    pub fn submit(&self) {
        self.explorer.submit_draft(NavigationIntent::Navigate);
    }

    #[wasm_bindgen(js_name = "selectSuggestion")]
    pub fn select_suggestion(&self, suggestion: &str) {
        self.explorer.select_suggestion(suggestion, NavigationIntent::Navigate);
    }

    /// Current snapshot
    #[wasm_bindgen]
    pub fn state(&self) -> JsValue {
        to_value(&self.explorer.snapshot())
    }

    /// Schema version choices, default first
    #[wasm_bindgen]
    pub fn versions(&self) -> JsValue {
        let catalog = self.explorer.catalog();
        let default = catalog.default_version();
        let mut choices = vec![default.as_str()];
        choices.extend(catalog.choices().iter().map(|v| v.as_str()).filter(|v| *v != default.as_str()));
        to_value(&choices)
    }

    /// Call `callback(snapshot)` after every change
    #[wasm_bindgen(js_name = "onChange")]
    pub fn on_change(&self, callback: js_sys::Function) {
        let mut rx = self.explorer.subscribe();
        wasm_bindgen_futures::spawn_local(async move {
            use futures::StreamExt;
            while let Some(snapshot) = rx.next().await {
                let _ = callback.call1(&JsValue::NULL, &to_value(&snapshot));
            }
        });
    }
}

impl Drop for ManifestExplorer {
    fn drop(&mut self) {
        if let (Some(window), Some(listener)) = (web_sys::window(), self.popstate.borrow_mut().take()) {
            let _ = window.remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
        }
    }
}
