//! Floating/stacked mode state machine
//!
//! Transitions are edge-triggered on the width-crossing predicate: only a
//! change in `should_float` since the previous viewport event switches mode.
//! While floating, every further viewport or content-size event relayouts.

use serde::Serialize;

use crate::config::FootnoteConfig;
use crate::error::FootnoteError;
use crate::layout::{ArticleSurface, FootnoteLayoutEngine, LayoutReport};
use crate::utils::{OperationStats, PerformanceMonitor};

const RELAYOUT_OPERATION: &str = "relayout";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Stacked,
    Floating,
}

/// What a viewport resize did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The mode switched to the contained value
    Entered(Mode),
    /// Still floating, offsets were recomputed
    Relayout,
    /// Still stacked, nothing to do
    Unchanged,
}

impl ResizeOutcome {
    pub fn is_transition(&self) -> bool {
        matches!(self, ResizeOutcome::Entered(_))
    }
}

/// Owns the mode, the width-crossing memory and the content subscription
pub struct ModeController<S: ArticleSurface> {
    surface: S,
    engine: FootnoteLayoutEngine,
    min_width: f64,
    mode: Mode,
    last_should_float: bool,
    subscription: Option<S::Subscription>,
    last_report: Option<LayoutReport>,
    monitor: PerformanceMonitor,
}

impl<S: ArticleSurface> ModeController<S> {
    pub fn new(surface: S, config: &FootnoteConfig) -> Self {
        Self {
            surface,
            engine: FootnoteLayoutEngine::new(),
            min_width: config.min_width,
            mode: Mode::Stacked,
            last_should_float: false,
            subscription: None,
            last_report: None,
            monitor: PerformanceMonitor::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_floating(&self) -> bool {
        self.mode == Mode::Floating
    }

    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn last_report(&self) -> Option<&LayoutReport> {
        self.last_report.as_ref()
    }

    pub fn relayout_stats(&self) -> OperationStats {
        self.monitor.stats(RELAYOUT_OPERATION)
    }

    /// Handle a viewport resize (also used for the initial evaluation)
    pub fn on_viewport_resize(&mut self, viewport_width: f64) -> Result<ResizeOutcome, FootnoteError> {
        let should_float = viewport_width >= self.min_width;

        if should_float == self.last_should_float {
            if self.is_floating() {
                self.refresh()?;
                return Ok(ResizeOutcome::Relayout);
            }
            return Ok(ResizeOutcome::Unchanged);
        }

        self.last_should_float = should_float;
        log::info!(
            "Viewport {}px crossed {}px threshold, footnotes {}",
            viewport_width,
            self.min_width,
            if should_float { "floating" } else { "stacked" }
        );

        if should_float {
            self.enter_floating()?;
            Ok(ResizeOutcome::Entered(Mode::Floating))
        } else {
            self.enter_stacked()?;
            Ok(ResizeOutcome::Entered(Mode::Stacked))
        }
    }

    /// Handle a size change of the observed content region
    ///
    /// Returns whether a relayout happened. Notifications that arrive after
    /// leaving floating mode are ignored.
    pub fn on_content_resize(&mut self) -> Result<bool, FootnoteError> {
        if !self.is_floating() {
            log::debug!("Content resized while stacked, ignoring");
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Recompute and apply offsets if floating
    pub fn relayout(&mut self) -> Result<Option<LayoutReport>, FootnoteError> {
        if !self.is_floating() {
            return Ok(None);
        }
        self.refresh()?;
        Ok(self.last_report.clone())
    }

    fn refresh(&mut self) -> Result<(), FootnoteError> {
        let started = self.surface.now_ms();
        let report = self.engine.apply_offsets(&self.surface)?;
        if let (Some(start), Some(end)) = (started, self.surface.now_ms()) {
            self.monitor.record_measurement(RELAYOUT_OPERATION, end - start);
        }

        self.last_report = Some(report);
        Ok(())
    }

    /// Return to stacked mode regardless of viewport width; idempotent
    pub fn shutdown(&mut self) -> Result<(), FootnoteError> {
        self.last_should_float = false;
        if self.is_floating() || self.subscription.is_some() {
            self.enter_stacked()?;
        }
        Ok(())
    }

    fn enter_floating(&mut self) -> Result<(), FootnoteError> {
        self.mode = Mode::Floating;
        if let Err(e) = self.start_floating() {
            self.abort_floating();
            return Err(e);
        }
        Ok(())
    }

    fn start_floating(&mut self) -> Result<(), FootnoteError> {
        self.surface.set_floating_flag(true)?;
        self.refresh()?;
        if self.subscription.is_none() {
            self.subscription = Some(self.surface.observe_content()?);
        }
        Ok(())
    }

    fn enter_stacked(&mut self) -> Result<(), FootnoteError> {
        // Unsubscribe before clearing; a failed clear must not leave the observer attached
        self.subscription = None;
        self.mode = Mode::Stacked;
        self.last_report = None;
        self.engine.clear_offsets(&self.surface)?;
        self.surface.set_floating_flag(false)
    }

    /// Best-effort fallback to stacked layout after a failed entry
    fn abort_floating(&mut self) {
        log::warn!("Could not float footnotes, falling back to stacked layout");
        if let Err(e) = self.enter_stacked() {
            log::warn!("Stacked fallback incomplete: {}", e);
        }
    }
}
