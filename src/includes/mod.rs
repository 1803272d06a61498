//! Fragment includes: fill every `[data-include]` placeholder from fetched
//! HTML, in document order, one at a time.

mod debug;
pub mod fetch;
pub mod scripts;

pub use debug::{DEBUG_SECTION_ID, DebugPanel};

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::error::LoadError;
use fetch::FragmentSource;

/// Attribute that marks an element as a fragment placeholder; its value is
/// the section name.
pub const INCLUDE_ATTR: &str = "data-include";

/// Drives the whole include pass over one document.
pub struct IncludeLoader<S> {
    document: Document,
    source: S,
    debug: DebugPanel,
}

impl<S: FragmentSource> IncludeLoader<S> {
    pub fn new(document: Document, source: S, debug: DebugPanel) -> Self {
        Self {
            document,
            source,
            debug,
        }
    }

    /// Process every placeholder present right now, sequentially in document
    /// order. Later fragments may rely on globals set up by earlier ones, so
    /// each load is awaited in full before the next starts. A failed
    /// placeholder logs, reveals the debug section, and never stops the rest.
    ///
    /// The placeholder set is a one-time snapshot: elements inserted while
    /// the pass runs are not picked up.
    pub async fn run(&self) {
        let selector = format!("[{INCLUDE_ATTR}]");
        let Ok(placeholders) = self.document.query_selector_all(&selector) else {
            return;
        };

        for i in 0..placeholders.length() {
            let Some(element) = placeholders
                .item(i)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let Some(section) = element.get_attribute(INCLUDE_ATTR) else {
                continue;
            };
            if let Err(err) = self.load_into(&element, &section).await {
                web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                self.debug.reveal();
            }
        }
    }

    /// Fetch one section and replace the placeholder's content in place.
    /// All or nothing: a failure injects nothing and leaves whatever content
    /// the placeholder already had.
    async fn load_into(&self, placeholder: &Element, section: &str) -> Result<(), LoadError> {
        let html = self.source.fetch(section).await?;
        placeholder.set_inner_html(&html);
        web_sys::console::log_1(&JsValue::from_str(&format!("section `{section}` loaded")));
        scripts::reactivate(&self.document, placeholder);
        Ok(())
    }
}
