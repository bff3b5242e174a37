//! Page readiness hooks
//!
//! Run a callback once the document is parsed, or once the window has
//! finished loading. Already-reached states defer through a short timeout so
//! the callback never runs inside the caller's stack.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::error::FootnoteError;

const DEFER_MS: i32 = 1;

fn page() -> Result<(Window, Document), FootnoteError> {
    let window = web_sys::window()
        .ok_or_else(|| FootnoteError::MissingStructure("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| FootnoteError::MissingStructure("document".to_string()))?;
    Ok((window, document))
}

/// Whether the document has been parsed
fn is_parsed(document: &Document) -> bool {
    matches!(
        document.ready_state().as_str(),
        "interactive" | "complete"
    )
}

fn defer(window: &Window, callback: JsValue) -> Result<(), FootnoteError> {
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), DEFER_MS)
        .map(|_| ())
        .map_err(|e| FootnoteError::from_js("setTimeout failed", &e))
}

/// Run `f` once the document has been parsed
pub fn on_document_ready<F: FnOnce() + 'static>(f: F) -> Result<(), FootnoteError> {
    let (window, document) = page()?;
    let callback = Closure::once_into_js(f);

    if is_parsed(&document) {
        defer(&window, callback)
    } else {
        document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(|e| FootnoteError::from_js("DOMContentLoaded listener failed", &e))
    }
}

/// Run `f` once the window, including images and stylesheets, has loaded
pub fn on_window_loaded<F: FnOnce() + 'static>(f: F) -> Result<(), FootnoteError> {
    let (window, document) = page()?;
    let callback = Closure::once_into_js(f);

    if document.ready_state() == "complete" {
        defer(&window, callback)
    } else {
        window
            .add_event_listener_with_callback("load", callback.unchecked_ref())
            .map_err(|e| FootnoteError::from_js("load listener failed", &e))
    }
}
