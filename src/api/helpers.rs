//! Shared helpers for WASM API operations
//!
//! Serialization across the JavaScript boundary and conversion of crate
//! errors into thrown values.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::FootnoteConfig;
use crate::error::FootnoteError;

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from(FootnoteError::Config(msg))
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log::error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Read an optional configuration object; `undefined`/`null` give defaults
pub fn config_from_js(value: JsValue) -> Result<FootnoteConfig, JsValue> {
    let config = if value.is_undefined() || value.is_null() {
        FootnoteConfig::default()
    } else {
        deserialize::<FootnoteConfig>(value, "Invalid footnote configuration")?
    };
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

/// Log a crate error and convert it into a thrown JavaScript `Error`
pub fn to_js_error(err: FootnoteError) -> JsValue {
    log::error!("{}", err);
    JsValue::from(err)
}
