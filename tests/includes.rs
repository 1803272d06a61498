//! Browser-level tests for the include pipeline: ordering, failure
//! isolation, script reactivation, and the debug fallback.

#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

use landing_wasm::error::LoadError;
use landing_wasm::includes::fetch::FragmentSource;
use landing_wasm::includes::{DEBUG_SECTION_ID, DebugPanel, IncludeLoader, scripts};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn install_page(html: &str) {
    document().body().unwrap().set_inner_html(html);
}

fn debug_div() -> String {
    format!(r#"<div id="{DEBUG_SECTION_ID}" style="display: none"></div>"#)
}

fn debug_display() -> String {
    document()
        .get_element_by_id(DEBUG_SECTION_ID)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap()
}

fn global_counter(name: &str) -> f64 {
    let window = web_sys::window().unwrap();
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn reset_global(name: &str) {
    let window = web_sys::window().unwrap();
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(name), &JsValue::from_f64(0.0));
}

/// Scripted fragment source: records call order and serves canned fragments.
/// Every fetch suspends for one event-loop tick while holding an `in_flight`
/// flag, so any second fetch that starts before the previous one finished
/// trips the assertion.
struct StubSource {
    calls: RefCell<Vec<String>>,
    in_flight: Cell<bool>,
    fragments: Vec<(&'static str, Result<&'static str, u16>)>,
}

impl StubSource {
    fn new(fragments: Vec<(&'static str, Result<&'static str, u16>)>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            in_flight: Cell::new(false),
            fragments,
        }
    }
}

impl FragmentSource for StubSource {
    async fn fetch(&self, section: &str) -> Result<String, LoadError> {
        assert!(
            !self.in_flight.get(),
            "fetch for `{section}` started while another fetch was still in flight"
        );
        self.in_flight.set(true);
        self.calls.borrow_mut().push(section.to_string());
        // Yield to the event loop so an overlapping caller would get its
        // chance to run before this fetch resolves.
        let _ = JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL)).await;
        self.in_flight.set(false);

        match self.fragments.iter().find(|(name, _)| *name == section) {
            Some((_, Ok(html))) => Ok((*html).to_string()),
            Some((_, Err(status))) => Err(LoadError::Fetch {
                section: section.into(),
                status: *status,
            }),
            None => Err(LoadError::Fetch {
                section: section.into(),
                status: 404,
            }),
        }
    }
}

fn loader<'a>(source: &'a StubSource) -> IncludeLoader<&'a StubSource> {
    let doc = document();
    let debug = DebugPanel::find(&doc);
    IncludeLoader::new(doc, source, debug)
}

#[wasm_bindgen_test]
async fn loads_every_placeholder_once_in_document_order_without_overlap() {
    install_page(&format!(
        concat!(
            r#"<div data-include="Hero"></div>"#,
            r#"<div data-include="Footer"></div>"#,
            "{}",
        ),
        debug_div()
    ));
    let source = StubSource::new(vec![
        ("Hero", Ok("<p>hero</p>")),
        ("Footer", Ok("<p>footer</p>")),
    ]);

    loader(&source).run().await;

    // The stub's in-flight assertion guarantees the Footer fetch could not
    // start until the Hero fetch (which suspends mid-flight) had finished.
    assert_eq!(
        *source.calls.borrow(),
        vec!["Hero".to_string(), "Footer".to_string()]
    );
    assert!(!source.in_flight.get());
    let hero = document()
        .query_selector("[data-include='Hero']")
        .unwrap()
        .unwrap();
    assert_eq!(hero.inner_html(), "<p>hero</p>");
    let footer = document()
        .query_selector("[data-include='Footer']")
        .unwrap()
        .unwrap();
    assert_eq!(footer.inner_html(), "<p>footer</p>");
    // Both loads succeeded, so the debug section stays hidden.
    assert_eq!(debug_display(), "none");
}

#[wasm_bindgen_test]
async fn a_failing_fetch_reveals_debug_and_does_not_stop_later_placeholders() {
    install_page(&format!(
        concat!(
            r#"<div data-include="Missing">old content</div>"#,
            r#"<div data-include="Footer"></div>"#,
            "{}",
        ),
        debug_div()
    ));
    let source = StubSource::new(vec![("Footer", Ok("<p>footer</p>"))]);

    loader(&source).run().await;

    // Both placeholders were attempted, in order.
    assert_eq!(
        *source.calls.borrow(),
        vec!["Missing".to_string(), "Footer".to_string()]
    );
    // Nothing was injected into the failed one.
    let missing = document()
        .query_selector("[data-include='Missing']")
        .unwrap()
        .unwrap();
    assert_eq!(missing.inner_html(), "old content");
    let footer = document()
        .query_selector("[data-include='Footer']")
        .unwrap()
        .unwrap();
    assert_eq!(footer.inner_html(), "<p>footer</p>");
    assert_eq!(debug_display(), "block");
}

#[wasm_bindgen_test]
async fn a_missing_debug_element_is_a_silent_no_op() {
    install_page(r#"<div data-include="Missing"></div>"#);
    let source = StubSource::new(vec![]);

    // Must not panic even though there is no debug section to reveal.
    loader(&source).run().await;
    assert!(document().get_element_by_id(DEBUG_SECTION_ID).is_none());
}

#[wasm_bindgen_test]
async fn injected_scripts_run_exactly_once_and_whitespace_scripts_are_skipped() {
    reset_global("__fragmentRuns");
    install_page(&format!(
        concat!(r#"<div data-include="Hero"></div>"#, "{}"),
        debug_div()
    ));
    let source = StubSource::new(vec![(
        "Hero",
        Ok(concat!(
            "<p>hero</p>",
            "<script>window.__fragmentRuns = (window.__fragmentRuns || 0) + 1;</script>",
            "<script>   \n  </script>",
        )),
    )]);

    let head_children_before = document().head().unwrap().child_element_count();
    loader(&source).run().await;

    assert_eq!(global_counter("__fragmentRuns"), 1.0);
    // The reactivated node was removed again; the head did not grow.
    assert_eq!(
        document().head().unwrap().child_element_count(),
        head_children_before
    );
    assert_eq!(debug_display(), "none");
}

#[wasm_bindgen_test]
fn reactivate_counts_only_non_empty_scripts() {
    reset_global("__reactivateRuns");
    let doc = document();
    let host = doc.create_element("div").unwrap();
    host.set_inner_html(concat!(
        "<script>window.__reactivateRuns = (window.__reactivateRuns || 0) + 1;</script>",
        "<script></script>",
        "<script>  </script>",
    ));
    doc.body().unwrap().append_child(&host).unwrap();

    // innerHTML-parsed scripts are inert until reactivated.
    assert_eq!(global_counter("__reactivateRuns"), 0.0);
    let executed = scripts::reactivate(&doc, &host);
    assert_eq!(executed, 1);
    assert_eq!(global_counter("__reactivateRuns"), 1.0);

    host.remove();
}

#[wasm_bindgen_test]
async fn a_throwing_script_does_not_block_its_siblings() {
    reset_global("__afterThrow");
    install_page(&format!(
        concat!(r#"<div data-include="Hero"></div>"#, "{}"),
        debug_div()
    ));
    let source = StubSource::new(vec![(
        "Hero",
        Ok(concat!(
            "<script>throw new Error('boom');</script>",
            "<script>window.__afterThrow = 1;</script>",
        )),
    )]);

    loader(&source).run().await;

    // The second script ran despite the first one throwing, and script
    // failures never reveal the debug section.
    assert_eq!(global_counter("__afterThrow"), 1.0);
    assert_eq!(debug_display(), "none");
}
