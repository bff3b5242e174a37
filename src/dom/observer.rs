//! Content-size observation
//!
//! Wraps one `ResizeObserver` plus its callback in an RAII subscription:
//! dropping it disconnects.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, ResizeObserver};

use crate::error::FootnoteError;

/// A live size observation of one element
pub struct ContentSubscription {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, JsValue)>,
}

impl ContentSubscription {
    /// Observe `target`, calling `on_change` for every batch of size changes
    pub fn observe(target: &Element, on_change: Rc<dyn Fn()>) -> Result<Self, FootnoteError> {
        let callback = Closure::<dyn FnMut(js_sys::Array, JsValue)>::new(
            move |_entries: js_sys::Array, _observer: JsValue| on_change(),
        );

        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|e| FootnoteError::Observer(format!("{:?}", e)))?;
        observer.observe(target);

        log::debug!("Observing <{}> for size changes", target.tag_name().to_lowercase());
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for ContentSubscription {
    fn drop(&mut self) {
        self.observer.disconnect();
        log::debug!("Content observer disconnected");
    }
}
