//! Floating Footnotes WASM API
//!
//! JavaScript-facing surface of the module.
//!
//! # Module Structure
//!
//! - `helpers`: serialization and error conversion at the JS boundary
//! - `runtime`: the running instance, its event wiring and the page bootstrap

pub mod helpers;
pub mod runtime;

pub use runtime::{
    anchorize_headings, bootstrap, disable_floating_footnotes, enable_floating_footnotes,
    FloatingFootnotes,
};
