//! Mode Controller
//!
//! Decides between floating and stacked footnotes from viewport width and
//! drives the layout engine and content observation accordingly.

pub mod controller;

pub use controller::{Mode, ModeController, ResizeOutcome};
