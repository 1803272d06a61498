//! Failure taxonomy for the include pipeline.
//!
//! None of these escape to a caller: load failures are logged and flip the
//! debug section visible, script failures are logged as warnings. The page
//! lifecycle always runs to completion.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A fragment that could not be loaded. Aborts that placeholder only; the
/// orchestrator continues with the next one.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("fragment `{section}` returned HTTP {status}")]
    Fetch { section: String, status: u16 },

    /// The request never produced a usable body: network down, rejected
    /// promise, or a body that was not text.
    #[error("fragment `{section}` failed in transport: {message}")]
    Transport { section: String, message: String },
}

/// A reactivated inline script that failed to build or run. Sibling scripts
/// in the same fragment still execute.
#[derive(Debug, Error)]
#[error("inline script failed: {0}")]
pub struct ScriptError(pub String);

/// Render an opaque JS error into something printable. Prefers the `message`
/// property of `Error` objects, falls back to the debug repr.
pub fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
