//! Floating Footnotes WASM Module
//!
//! Floats the footnotes of an article beside the paragraphs that cite them
//! once the viewport is wide enough, and adds anchor links to section
//! headings.
//!
//! The layout engine and mode controller are browser-independent and work
//! against the traits in [`layout::surface`]; [`dom`] implements them with
//! `web-sys`.

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod layout;
pub mod mode;
pub mod utils;

// Re-export commonly used types
pub use config::FootnoteConfig;
pub use error::FootnoteError;
pub use layout::{compute_offsets, FootnoteBox, FootnoteLayoutEngine, LayoutReport, Placement};
pub use mode::{Mode, ModeController, ResizeOutcome};

use wasm_bindgen::prelude::*;

// Runs when the module is instantiated on a page.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = FootnoteConfig::default();

    #[cfg(feature = "console_log")]
    if let Some(level) = config.level_filter() {
        // A logger may already be installed by the host page
        console_log::init_with_level(level).ok();
    }

    log::info!("Floating footnotes WASM module initialized");

    if let Err(e) = api::bootstrap(config) {
        log::warn!("Floating footnotes not started: {}", e);
    }
}
