//! Footnote layout engine
//!
//! Walks the footnotes of a page in document order, measures each against its
//! citation, and writes the stacked offset back before moving on to the next.

use serde::{Deserialize, Serialize};

use super::stacking::OffsetStacker;
use super::surface::FootnoteGeometry;
use crate::error::FootnoteError;

/// Where one footnote ended up
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: String,
    pub desired_top: f64,
    pub offset: f64,
}

/// Result of one relayout
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    /// Positioned footnotes, in document order
    pub placements: Vec<Placement>,

    /// Ids of footnotes that could not be positioned
    pub skipped: Vec<String>,
}

impl LayoutReport {
    pub fn offset_of(&self, id: &str) -> Option<f64> {
        self.placements.iter().find(|p| p.id == id).map(|p| p.offset)
    }

    pub fn offsets(&self) -> Vec<f64> {
        self.placements.iter().map(|p| p.offset).collect()
    }
}

/// Applies and removes floated footnote offsets
#[derive(Debug, Default, Clone, Copy)]
pub struct FootnoteLayoutEngine;

impl FootnoteLayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute offsets from scratch and apply them
    ///
    /// Footnotes whose citation or positioning context cannot be found are
    /// skipped with a warning; they keep no offset and do not advance the
    /// stacking cursor. Any other host failure aborts the relayout.
    pub fn apply_offsets<G: FootnoteGeometry>(&self, host: &G) -> Result<LayoutReport, FootnoteError> {
        let notes = host.footnotes()?;
        let mut stacker = OffsetStacker::new();
        let mut report = LayoutReport::default();

        for note in &notes {
            let id = host.note_id(note);
            let desired_top = match host.alignment_top(note) {
                Ok(top) => top,
                Err(e) if e.is_per_footnote() => {
                    log::warn!("Skipping footnote '{}': {}", id, e);
                    host.clear_offset(note)?;
                    report.skipped.push(id);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let offset = stacker.place(desired_top, host.extent(note));
            host.set_offset(note, offset)?;
            report.placements.push(Placement { id, desired_top, offset });
        }

        log::debug!(
            "Placed {} footnotes ({} skipped), bottom at {}px",
            report.placements.len(),
            report.skipped.len(),
            stacker.bottom_of_last()
        );
        Ok(report)
    }

    /// Remove applied offsets from every footnote; safe to repeat
    pub fn clear_offsets<G: FootnoteGeometry>(&self, host: &G) -> Result<usize, FootnoteError> {
        let notes = host.footnotes()?;
        for note in &notes {
            host.clear_offset(note)?;
        }
        Ok(notes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Minimal page: (id, alignment top or None when uncited, extent)
    struct FakePage {
        notes: Vec<(&'static str, Option<f64>, f64)>,
        offsets: RefCell<HashMap<&'static str, f64>>,
    }

    impl FakePage {
        fn new(notes: Vec<(&'static str, Option<f64>, f64)>) -> Self {
            Self { notes, offsets: RefCell::new(HashMap::new()) }
        }
    }

    impl FootnoteGeometry for FakePage {
        type Note = usize;

        fn footnotes(&self) -> Result<Vec<usize>, FootnoteError> {
            Ok((0..self.notes.len()).collect())
        }

        fn note_id(&self, note: &usize) -> String {
            self.notes[*note].0.to_string()
        }

        fn alignment_top(&self, note: &usize) -> Result<f64, FootnoteError> {
            let (id, top, _) = self.notes[*note];
            top.ok_or_else(|| FootnoteError::UnresolvedReference(id.to_string()))
        }

        fn extent(&self, note: &usize) -> f64 {
            self.notes[*note].2
        }

        fn set_offset(&self, note: &usize, offset: f64) -> Result<(), FootnoteError> {
            self.offsets.borrow_mut().insert(self.notes[*note].0, offset);
            Ok(())
        }

        fn clear_offset(&self, note: &usize) -> Result<(), FootnoteError> {
            self.offsets.borrow_mut().remove(self.notes[*note].0);
            Ok(())
        }
    }

    #[test]
    fn test_apply_writes_stacked_offsets() {
        let page = FakePage::new(vec![
            ("fn:1", Some(10.0), 20.0),
            ("fn:2", Some(12.0), 20.0),
            ("fn:3", Some(15.0), 20.0),
        ]);
        let report = FootnoteLayoutEngine::new().apply_offsets(&page).unwrap();

        assert_eq!(report.offsets(), vec![10.0, 30.0, 50.0]);
        assert_eq!(page.offsets.borrow()["fn:2"], 30.0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_uncited_footnote_is_skipped_without_advancing_cursor() {
        let page = FakePage::new(vec![
            ("fn:1", Some(100.0), 40.0),
            ("fn:2", None, 500.0),
            ("fn:3", Some(110.0), 40.0),
        ]);
        let report = FootnoteLayoutEngine::new().apply_offsets(&page).unwrap();

        assert_eq!(report.skipped, vec!["fn:2".to_string()]);
        assert_eq!(report.offset_of("fn:3"), Some(140.0));
        assert!(!page.offsets.borrow().contains_key("fn:2"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let page = FakePage::new(vec![("fn:1", Some(5.0), 10.0), ("fn:2", Some(6.0), 10.0)]);
        let engine = FootnoteLayoutEngine::new();
        engine.apply_offsets(&page).unwrap();

        assert_eq!(engine.clear_offsets(&page).unwrap(), 2);
        assert!(page.offsets.borrow().is_empty());
        assert_eq!(engine.clear_offsets(&page).unwrap(), 2);
        assert!(page.offsets.borrow().is_empty());
    }
}
