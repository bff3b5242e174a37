//! Error types for footnote floating
//!
//! None of these ever reach the page UI. Inside the crate they travel as
//! `Result<T, FootnoteError>`; the `api` boundary turns them into
//! `js_sys::Error` values carrying a machine-readable `code`.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while locating, measuring or observing footnotes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootnoteError {
    /// Footnote container or article region is absent; the feature stays off
    #[error("Missing page structure: {0}")]
    MissingStructure(String),

    /// A footnote has no in-text reference citing it
    #[error("No in-text reference found for footnote '{0}'")]
    UnresolvedReference(String),

    /// A footnote is not laid out (no offset parent), so it cannot be positioned
    #[error("Footnote '{0}' has no positioning context")]
    MissingPositioningContext(String),

    /// The content-size observer could not be created or attached
    #[error("Content observer error: {0}")]
    Observer(String),

    /// Any other DOM call that threw
    #[error("DOM error: {0}")]
    Dom(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FootnoteError {
    /// Stable code exposed to JavaScript as `error.code`
    pub fn code(&self) -> &'static str {
        match self {
            FootnoteError::MissingStructure(_) => "MISSING_STRUCTURE",
            FootnoteError::UnresolvedReference(_) => "UNRESOLVED_REFERENCE",
            FootnoteError::MissingPositioningContext(_) => "MISSING_POSITIONING_CONTEXT",
            FootnoteError::Observer(_) => "OBSERVER_ERROR",
            FootnoteError::Dom(_) => "DOM_ERROR",
            FootnoteError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Wrap a thrown JavaScript value as a DOM error
    pub fn from_js(context: &str, value: &JsValue) -> Self {
        let detail = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        FootnoteError::Dom(format!("{}: {}", context, detail))
    }

    /// Whether the failure only affects a single footnote
    ///
    /// Per-footnote failures are skipped during a relayout; everything else
    /// aborts it.
    pub fn is_per_footnote(&self) -> bool {
        matches!(
            self,
            FootnoteError::UnresolvedReference(_) | FootnoteError::MissingPositioningContext(_)
        )
    }
}

impl From<FootnoteError> for JsValue {
    fn from(err: FootnoteError) -> Self {
        let js_error = js_sys::Error::new(&err.to_string());
        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(err.code())).ok();
        js_error.into()
    }
}
