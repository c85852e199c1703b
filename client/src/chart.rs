use ecopack_shared::ChartSpec;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::dom;

#[wasm_bindgen]
extern "C" {
    /// Chart.js, loaded by the page as a global.
    #[wasm_bindgen(js_name = Chart)]
    type JsChart;

    #[wasm_bindgen(constructor, catch, js_class = "Chart")]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<JsChart, JsValue>;
}

/// Draw one chart onto its canvas. Returns false when it was skipped.
pub fn render(spec: &ChartSpec) -> bool {
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>(&spec.mount_id) else {
        dom::warn(&format!("Canvas element '{}' not found.", spec.mount_id));
        return false;
    };

    let config = match serde_wasm_bindgen::to_value(&spec.config) {
        Ok(config) => config,
        Err(e) => {
            dom::error(&format!("Chart '{}' config error: {e}", spec.mount_id));
            return false;
        }
    };

    match JsChart::new(&canvas, &config) {
        Ok(_) => true,
        Err(e) => {
            web_sys::console::error_2(
                &format!("Chart '{}' could not be created:", spec.mount_id).into(),
                &e,
            );
            false
        }
    }
}
