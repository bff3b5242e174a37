// In-memory page used by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use floating_footnotes_wasm::layout::{ArticleSurface, FootnoteGeometry};
use floating_footnotes_wasm::FootnoteError;

#[derive(Clone, Debug)]
pub struct FakeNote {
    pub id: String,
    /// Alignment target top; `None` when nothing cites the note
    pub top: Option<f64>,
    pub extent: f64,
}

/// Counts live subscriptions; dropping one decrements the counter
pub struct FakeSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get() - 1);
    }
}

#[derive(Default)]
pub struct FakePage {
    notes: RefCell<Vec<FakeNote>>,
    pub offsets: RefCell<HashMap<String, f64>>,
    pub floating_flag: Cell<bool>,
    pub active_subscriptions: Rc<Cell<usize>>,
    pub observe_calls: Cell<usize>,
    pub fail_observe: Cell<bool>,
    clock: Cell<f64>,
}

impl FakePage {
    /// Notes `fn:1..` with the given alignment tops and extents
    pub fn with_notes(tops: &[f64], extents: &[f64]) -> Self {
        let notes = tops
            .iter()
            .zip(extents)
            .enumerate()
            .map(|(i, (top, extent))| FakeNote {
                id: format!("fn:{}", i + 1),
                top: Some(*top),
                extent: *extent,
            })
            .collect();
        Self {
            notes: RefCell::new(notes),
            ..Self::default()
        }
    }

    pub fn uncite(&self, id: &str) {
        for note in self.notes.borrow_mut().iter_mut().filter(|n| n.id == id) {
            note.top = None;
        }
    }

    pub fn move_citation(&self, id: &str, top: f64) {
        for note in self.notes.borrow_mut().iter_mut().filter(|n| n.id == id) {
            note.top = Some(top);
        }
    }

    pub fn offset(&self, id: &str) -> Option<f64> {
        self.offsets.borrow().get(id).copied()
    }

    pub fn offsets_in_order(&self) -> Vec<Option<f64>> {
        self.notes
            .borrow()
            .iter()
            .map(|n| self.offset(&n.id))
            .collect()
    }

    pub fn has_any_offset(&self) -> bool {
        !self.offsets.borrow().is_empty()
    }
}

impl FootnoteGeometry for FakePage {
    type Note = FakeNote;

    fn footnotes(&self) -> Result<Vec<FakeNote>, FootnoteError> {
        Ok(self.notes.borrow().clone())
    }

    fn note_id(&self, note: &FakeNote) -> String {
        note.id.clone()
    }

    fn alignment_top(&self, note: &FakeNote) -> Result<f64, FootnoteError> {
        note.top
            .ok_or_else(|| FootnoteError::UnresolvedReference(note.id.clone()))
    }

    fn extent(&self, note: &FakeNote) -> f64 {
        note.extent
    }

    fn set_offset(&self, note: &FakeNote, offset: f64) -> Result<(), FootnoteError> {
        self.offsets.borrow_mut().insert(note.id.clone(), offset);
        Ok(())
    }

    fn clear_offset(&self, note: &FakeNote) -> Result<(), FootnoteError> {
        self.offsets.borrow_mut().remove(&note.id);
        Ok(())
    }

    fn now_ms(&self) -> Option<f64> {
        let now = self.clock.get();
        self.clock.set(now + 2.5);
        Some(now)
    }
}

impl ArticleSurface for FakePage {
    type Subscription = FakeSubscription;

    fn set_floating_flag(&self, floating: bool) -> Result<(), FootnoteError> {
        self.floating_flag.set(floating);
        Ok(())
    }

    fn observe_content(&self) -> Result<FakeSubscription, FootnoteError> {
        self.observe_calls.set(self.observe_calls.get() + 1);
        if self.fail_observe.get() {
            return Err(FootnoteError::Observer("ResizeObserver unavailable".to_string()));
        }
        self.active_subscriptions.set(self.active_subscriptions.get() + 1);
        Ok(FakeSubscription {
            active: self.active_subscriptions.clone(),
        })
    }
}
