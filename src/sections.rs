//! Section ordering metadata, mirrored from the site configuration.
//!
//! The include loader discovers placeholders from the live DOM; this list
//! only names which sections should exist and in which order. Both are
//! maintained by hand, so boot cross-checks them and warns about drift.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::includes::INCLUDE_ATTR;

/// One entry of the section list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    /// Component folder the fragment lives in (usually equal to `name`).
    pub folder: String,
    pub enabled: bool,
    pub order: u32,
}

/// Built-in section list, same entries the static site ships with.
pub fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            name: "Section1".into(),
            folder: "Section1".into(),
            enabled: true,
            order: 1,
        },
        SectionConfig {
            name: "SectionIdeal".into(),
            folder: "SectionIdeal".into(),
            enabled: true,
            order: 2,
        },
    ]
}

/// Enabled sections, sorted by their configured order.
pub fn enabled_in_order(sections: &[SectionConfig]) -> Vec<&SectionConfig> {
    let mut enabled: Vec<&SectionConfig> = sections.iter().filter(|s| s.enabled).collect();
    enabled.sort_by_key(|s| s.order);
    enabled
}

/// Warn about every enabled section that has no placeholder in the document.
/// Informational only; the loader still works off the DOM alone.
pub fn warn_missing_placeholders(document: &Document, sections: &[SectionConfig]) {
    for section in enabled_in_order(sections) {
        let selector = format!("[{}=\"{}\"]", INCLUDE_ATTR, section.name);
        let found = matches!(document.query_selector(&selector), Ok(Some(_)));
        if !found {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "section `{}` is enabled but the page has no [{}] placeholder for it",
                section.name, INCLUDE_ATTR
            )));
        }
    }
}
