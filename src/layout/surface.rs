//! Host seams for the layout engine and mode controller
//!
//! The core never touches the DOM directly. The browser implementation lives
//! in `crate::dom`; tests drive the same code through an in-memory page.

use crate::error::FootnoteError;

/// Geometry reads and style writes for footnotes
pub trait FootnoteGeometry {
    /// Handle to one footnote entry
    type Note;

    /// Current footnote entries in document order
    fn footnotes(&self) -> Result<Vec<Self::Note>, FootnoteError>;

    /// Stable identity of a footnote (its element id)
    fn note_id(&self, note: &Self::Note) -> String;

    /// Top of the footnote's alignment target relative to the footnote's
    /// positioning origin, read synchronously
    fn alignment_top(&self, note: &Self::Note) -> Result<f64, FootnoteError>;

    /// Rendered height plus top and bottom margins
    fn extent(&self, note: &Self::Note) -> f64;

    /// Position the footnote absolutely at `offset`
    fn set_offset(&self, note: &Self::Note, offset: f64) -> Result<(), FootnoteError>;

    /// Remove any applied offset, restoring normal flow
    fn clear_offset(&self, note: &Self::Note) -> Result<(), FootnoteError>;

    /// Monotonic clock in milliseconds, when the host has one
    fn now_ms(&self) -> Option<f64> {
        None
    }
}

/// Everything the mode controller needs on top of geometry
pub trait ArticleSurface: FootnoteGeometry {
    /// Live content-size subscription; dropping it stops observation
    type Subscription;

    /// Toggle the floating styling flag on the footnote container
    fn set_floating_flag(&self, floating: bool) -> Result<(), FootnoteError>;

    /// Start observing the article content region for size changes
    fn observe_content(&self) -> Result<Self::Subscription, FootnoteError>;
}
