use ecopack_shared::PageConfig;
use wasm_bindgen::JsValue;

use crate::dom;

/// Global a page may define to override any part of the defaults.
const CONFIG_GLOBAL: &str = "ECOPACK_CONFIG";

pub fn load() -> PageConfig {
    let Some(window) = web_sys::window() else {
        return PageConfig::default();
    };
    let raw = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if raw.is_undefined() || raw.is_null() {
        return PageConfig::default();
    }

    let parsed = serde_wasm_bindgen::from_value::<serde_json::Value>(raw)
        .map_err(|e| e.to_string())
        .and_then(|value| PageConfig::from_json_value(value).map_err(|e| e.to_string()));
    match parsed {
        Ok(config) => config,
        Err(e) => {
            dom::warn(&format!("{CONFIG_GLOBAL} ignored: {e}"));
            PageConfig::default()
        }
    }
}
