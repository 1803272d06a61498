//! Landing-page assembler, compiled to WASM.
//!
//! The page ships as a skeleton of `[data-include]` placeholders; this crate
//! fills each one with a fetched HTML fragment (sequentially, in document
//! order, so fragment side effects run deterministically), re-executes the
//! inline scripts those fragments carry, and drives the two autoplay
//! carousels. A load failure reveals the hidden `#debug-section` element and
//! never aborts the rest of the page.

pub mod carousel;
pub mod error;
pub mod includes;
pub mod sections;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::includes::{DebugPanel, IncludeLoader, fetch::HttpFragmentSource};

/// Module entry: set up panic reporting and run [`boot`] once the DOM is
/// ready. When the module loads after parsing finished (the usual case for a
/// deferred module script), boot runs immediately.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once(move || boot(&doc));
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        boot(&document);
    }
}

/// Page-ready entry: kick off the include pass, then bring up the carousels.
///
/// The include pass runs as a spawned task; the carousels mount right away
/// against whatever markup the initial page carries. They are deliberately
/// not gated on the fragments finishing.
pub fn boot(document: &Document) {
    sections::warn_missing_placeholders(document, &sections::default_sections());

    let loader = IncludeLoader::new(
        document.clone(),
        HttpFragmentSource::default(),
        DebugPanel::find(document),
    );
    spawn_local(async move {
        loader.run().await;
    });

    let _widgets = carousel::mount_all(document);
}
