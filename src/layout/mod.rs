//! Footnote Layout
//!
//! Computes where each floated footnote goes and applies it through a host
//! surface, independent of the browser.

pub mod engine;
pub mod stacking;
pub mod surface;

pub use engine::{FootnoteLayoutEngine, LayoutReport, Placement};
pub use stacking::{compute_offsets, is_non_overlapping, FootnoteBox, OffsetStacker};
pub use surface::{ArticleSurface, FootnoteGeometry};
