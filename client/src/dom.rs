use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Look up an element by id and cast it, `None` if missing or of another type.
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn has_element(id: &str) -> bool {
    document().is_some_and(|doc| doc.get_element_by_id(id).is_some())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    el.style().set_property(property, value).ok();
}

pub fn set_text(id: &str, text: &str) {
    if let Some(document) = document()
        && let Some(el) = document.get_element_by_id(id)
    {
        el.set_text_content(Some(text));
    }
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}
