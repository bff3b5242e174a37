//! Non-overlapping vertical stacking of floated footnotes
//!
//! Each footnote wants to sit level with its citation. When two citations are
//! close together the later footnote is pushed down below the earlier one,
//! never the other way round.

use serde::{Deserialize, Serialize};

/// Measured input for one footnote
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct FootnoteBox {
    /// Alignment target top relative to the positioning origin
    pub desired_top: f64,

    /// Rendered height plus vertical margins
    pub extent: f64,
}

impl FootnoteBox {
    pub fn new(desired_top: f64, extent: f64) -> Self {
        Self { desired_top, extent }
    }
}

/// Running cursor over footnotes in document order
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OffsetStacker {
    bottom_of_last: f64,
}

impl OffsetStacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bottom edge (including margins) of the last placed footnote
    pub fn bottom_of_last(&self) -> f64 {
        self.bottom_of_last
    }

    /// Place the next footnote and advance the cursor past it
    ///
    /// A non-finite desired position clamps to the cursor.
    pub fn place(&mut self, desired_top: f64, extent: f64) -> f64 {
        let offset = if desired_top.is_finite() {
            desired_top.max(self.bottom_of_last)
        } else {
            self.bottom_of_last
        };
        let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
        self.bottom_of_last = offset + extent;
        offset
    }
}

/// Compute offsets for already-measured footnotes
pub fn compute_offsets(boxes: &[FootnoteBox]) -> Vec<f64> {
    let mut stacker = OffsetStacker::new();
    boxes
        .iter()
        .map(|b| stacker.place(b.desired_top, b.extent))
        .collect()
}

/// Check that `offsets` never overlap given the boxes they were computed from
pub fn is_non_overlapping(boxes: &[FootnoteBox], offsets: &[f64]) -> bool {
    offsets.iter().all(|o| *o >= 0.0)
        && boxes
            .iter()
            .zip(offsets)
            .zip(offsets.iter().skip(1))
            .all(|((b, current), next)| *next >= current + b.extent)
}
