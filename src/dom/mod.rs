//! Browser bindings
//!
//! `web-sys` implementations of the layout surfaces, content observation,
//! heading anchors and page readiness.

pub mod anchors;
pub mod article;
pub mod observer;
pub mod ready;

pub use anchors::anchorize_headings;
pub use article::{viewport_width, DomArticle};
pub use observer::ContentSubscription;
pub use ready::{on_document_ready, on_window_loaded};
