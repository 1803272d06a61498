//! Script reactivation.
//!
//! Scripts injected through `innerHTML` are inert: the browser parses them
//! but never executes them. Each one is rebuilt as a fresh node and inserted
//! into `<head>`, which runs it synchronously in the page's global scope.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::error::{ScriptError, js_error_message};

/// Execute every non-empty inline script found under `subtree`. Returns how
/// many scripts actually ran. A script that fails to build or run is logged
/// as a warning; its siblings still execute.
pub fn reactivate(document: &Document, subtree: &Element) -> usize {
    let Ok(scripts) = subtree.query_selector_all("script") else {
        return 0;
    };

    let mut executed = 0;
    for i in 0..scripts.length() {
        let Some(node) = scripts.item(i) else {
            continue;
        };
        let Some(source) = node.text_content() else {
            continue;
        };
        if source.trim().is_empty() {
            continue;
        }
        match run_inline(document, &source) {
            Ok(()) => executed += 1,
            Err(err) => web_sys::console::warn_1(&JsValue::from_str(&err.to_string())),
        }
    }
    executed
}

fn run_inline(document: &Document, source: &str) -> Result<(), ScriptError> {
    let head = document
        .head()
        .ok_or_else(|| ScriptError("document has no <head>".into()))?;
    let script = document
        .create_element("script")
        .map_err(|e| ScriptError(js_error_message(&e)))?;
    script.set_text_content(Some(source));
    // Insertion into the live head triggers execution; removing the node
    // right after keeps the head from accumulating one script per load.
    head.append_child(&script)
        .map_err(|e| ScriptError(js_error_message(&e)))?;
    head.remove_child(&script)
        .map_err(|e| ScriptError(js_error_message(&e)))?;
    Ok(())
}
