//! Fragment retrieval: section name in, HTML text out.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::{LoadError, js_error_message};

/// Where fragment HTML comes from. The orchestrator takes this as a
/// constructor argument so tests can substitute a scripted source.
#[allow(async_fn_in_trait)]
pub trait FragmentSource {
    async fn fetch(&self, section: &str) -> Result<String, LoadError>;
}

impl<S: FragmentSource> FragmentSource for &S {
    async fn fetch(&self, section: &str) -> Result<String, LoadError> {
        (**self).fetch(section).await
    }
}

/// The production source: fetches `{base}/{section}.html` relative to the
/// page origin.
pub struct HttpFragmentSource {
    base: String,
}

impl HttpFragmentSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for HttpFragmentSource {
    fn default() -> Self {
        Self::new("./Componentes")
    }
}

/// Deterministic request path for a section name.
pub fn fragment_url(base: &str, section: &str) -> String {
    format!("{}/{}.html", base.trim_end_matches('/'), section)
}

impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, section: &str) -> Result<String, LoadError> {
        let transport = |err: JsValue| LoadError::Transport {
            section: section.to_string(),
            message: js_error_message(&err),
        };

        let window = web_sys::window().ok_or_else(|| LoadError::Transport {
            section: section.to_string(),
            message: "no window".into(),
        })?;

        let url = fragment_url(&self.base, section);
        let response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .map_err(transport)?;
        let response: Response = response.dyn_into().map_err(transport)?;

        if !response.ok() {
            return Err(LoadError::Fetch {
                section: section.to_string(),
                status: response.status(),
            });
        }

        let body = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        body.as_string().ok_or_else(|| LoadError::Transport {
            section: section.to_string(),
            message: "response body was not text".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_follows_the_component_convention() {
        assert_eq!(
            fragment_url("./Componentes", "Hero"),
            "./Componentes/Hero.html"
        );
    }

    #[test]
    fn url_tolerates_a_trailing_slash_in_the_base() {
        assert_eq!(
            fragment_url("./Componentes/", "Footer"),
            "./Componentes/Footer.html"
        );
    }
}
