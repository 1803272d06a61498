//! Debug fallback: a normally-hidden diagnostic section that gets revealed
//! when a fragment fails to load.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Id of the diagnostic element expected in the page markup.
pub const DEBUG_SECTION_ID: &str = "debug-section";

/// Handle to the diagnostic element, resolved once up front. The element is
/// optional: pages without it simply lose the visual fallback.
pub struct DebugPanel {
    element: Option<HtmlElement>,
}

impl DebugPanel {
    pub fn find(document: &Document) -> Self {
        let element = document
            .get_element_by_id(DEBUG_SECTION_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self { element }
    }

    /// Make the diagnostic section visible. Idempotent; no-op when the page
    /// has no such element.
    pub fn reveal(&self) {
        if let Some(el) = &self.element {
            let _ = el.style().set_property("display", "block");
            web_sys::console::log_1(&JsValue::from_str("revealing debug section"));
        }
    }
}
