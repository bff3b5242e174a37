//! Running instance wiring
//!
//! Connects the mode controller to the two event sources that drive it: the
//! window `resize` event and the article's content observer. The controller is
//! shared as `Rc<RefCell<..>>`; the observer callback only holds a `Weak` so
//! dropping the instance releases everything.
//!
//! A page runs at most one instance. Every instance, auto-started or enabled
//! from JavaScript, lives in the `ACTIVE` slot tagged with a generation.
//! Starting or disabling bumps the generation, which supersedes older
//! handles and cancels a bootstrap still waiting for the page to load.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::helpers::{config_from_js, serialize, to_js_error};
use crate::config::FootnoteConfig;
use crate::dom::{self, DomArticle};
use crate::error::FootnoteError;
use crate::mode::{ModeController, ResizeOutcome};

type SharedController = Rc<RefCell<ModeController<DomArticle>>>;

thread_local! {
    /// The page's running instance
    static ACTIVE: RefCell<Option<Instance>> = RefCell::new(None);

    /// Bumped on every manual start or disable
    static GENERATION: Cell<u32> = Cell::new(0);
}

fn current_generation() -> u32 {
    GENERATION.with(|generation| generation.get())
}

fn next_generation() -> u32 {
    GENERATION.with(|generation| {
        let next = generation.get().wrapping_add(1);
        generation.set(next);
        next
    })
}

/// Controller plus the listeners feeding it
struct Instance {
    generation: u32,
    controller: SharedController,
    window: Window,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

impl Instance {
    /// Take over `page`: listen for viewport resizes and evaluate the width once
    fn attach(page: DomArticle, config: &FootnoteConfig, generation: u32) -> Result<Self, FootnoteError> {
        let window = page.window().clone();
        let controller: SharedController = Rc::new_cyclic(|weak| {
            let page = page.with_content_listener(content_listener(weak.clone()));
            RefCell::new(ModeController::new(page, config))
        });

        let listener = {
            let controller = controller.clone();
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || handle_viewport_resize(&controller, &window))
        };
        window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            .map_err(|e| FootnoteError::from_js("resize listener failed", &e))?;

        let instance = Self {
            generation,
            controller,
            window,
            resize_listener: Some(listener),
        };
        handle_viewport_resize(&instance.controller, &instance.window);
        Ok(instance)
    }

    fn teardown(&mut self) {
        if let Some(listener) = self.resize_listener.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            {
                log::warn!("Removing resize listener failed: {:?}", e);
            }
        }
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                if let Err(e) = controller.shutdown() {
                    log::warn!("Restoring stacked footnotes failed: {}", e);
                }
            }
            Err(_) => log::warn!("Footnote controller busy during teardown"),
        }
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Remove the running instance; it is torn down once the slot is released
fn take_active() -> Option<Instance> {
    ACTIVE.with(|slot| slot.borrow_mut().take())
}

/// Put `instance` in the slot, tearing down whatever was there
fn install(instance: Instance) {
    let previous = ACTIVE.with(|slot| slot.borrow_mut().replace(instance));
    drop(previous);
}

/// Run `f` on the running instance if it belongs to `generation`
fn with_instance<R>(generation: u32, f: impl FnOnce(&Instance) -> R) -> Option<R> {
    ACTIVE.with(|slot| {
        slot.borrow()
            .as_ref()
            .filter(|instance| instance.generation == generation)
            .map(f)
    })
}

/// JavaScript handle to an instance started with `enableFloatingFootnotes`
///
/// A handle goes inert once a later start or a disable supersedes it.
#[wasm_bindgen]
pub struct FloatingFootnotes {
    generation: u32,
}

#[wasm_bindgen]
impl FloatingFootnotes {
    /// Whether this handle still owns the page's running instance
    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        with_instance(self.generation, |_| ()).is_some()
    }

    /// Recompute offsets now; returns the layout report, or `null` when
    /// stacked or superseded
    pub fn relayout(&self) -> Result<JsValue, JsValue> {
        let report = with_instance(self.generation, |instance| {
            let mut controller = instance
                .controller
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Footnote controller is busy"))?;
            controller.relayout().map_err(to_js_error)
        });
        match report {
            Some(Ok(Some(report))) => serialize(&report, "Serializing layout report failed"),
            Some(Err(e)) => Err(e),
            Some(Ok(None)) | None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = isFloating)]
    pub fn is_floating(&self) -> bool {
        with_instance(self.generation, |instance| {
            instance
                .controller
                .try_borrow()
                .map(|controller| controller.is_floating())
                .unwrap_or(false)
        })
        .unwrap_or(false)
    }

    /// Relayout timing statistics, `null` once superseded
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let stats = with_instance(self.generation, |instance| {
            instance
                .controller
                .try_borrow()
                .map(|controller| controller.relayout_stats())
                .map_err(|_| JsValue::from_str("Footnote controller is busy"))
        });
        match stats {
            Some(stats) => serialize(&stats?, "Serializing stats failed"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Stop listening and restore stacked footnotes; safe to call repeatedly
    pub fn disable(&self) {
        if self.is_active() {
            disable_floating_footnotes();
        }
    }
}

fn content_listener(controller: Weak<RefCell<ModeController<DomArticle>>>) -> Rc<dyn Fn()> {
    Rc::new(move || {
        let Some(controller) = controller.upgrade() else {
            return;
        };
        let Ok(mut controller) = controller.try_borrow_mut() else {
            log::debug!("Content resize during relayout, skipped");
            return;
        };
        if let Err(e) = controller.on_content_resize() {
            log::warn!("Relayout after content resize failed: {}", e);
        }
    })
}

fn handle_viewport_resize(controller: &SharedController, window: &Window) {
    let width = dom::viewport_width(window);
    let Ok(mut controller) = controller.try_borrow_mut() else {
        log::debug!("Viewport resize during relayout, skipped");
        return;
    };
    match controller.on_viewport_resize(width) {
        Ok(ResizeOutcome::Entered(mode)) => log::debug!("Footnotes now {:?} at {}px", mode, width),
        Ok(_) => {}
        Err(e) => log::warn!("Footnote update at {}px failed: {}", width, e),
    }
}

/// Locate the page structure, honouring the opt-out class
fn locate_page(config: &FootnoteConfig) -> Result<DomArticle, FootnoteError> {
    let page = DomArticle::locate(config)?;
    if page.is_opted_out() {
        return Err(FootnoteError::MissingStructure(format!(
            "article opted out with .{}",
            config.opt_out_class
        )));
    }
    Ok(page)
}

/// Auto-start: wait for the page, anchor headings, then float footnotes
///
/// Abandoned if footnotes are enabled or disabled from JavaScript before the
/// page finishes loading.
pub fn bootstrap(config: FootnoteConfig) -> Result<(), FootnoteError> {
    let generation = current_generation();
    dom::on_document_ready(move || {
        if current_generation() != generation {
            log::debug!("Bootstrap superseded before document ready");
            return;
        }
        let page = match locate_page(&config) {
            Ok(page) => page,
            Err(e) => {
                log::info!("Floating footnotes disabled: {}", e);
                return;
            }
        };

        if config.anchor_headings {
            if let Err(e) = dom::anchorize_headings(page.document(), &config) {
                log::warn!("Heading anchors not added: {}", e);
            }
        }

        let loaded = dom::on_window_loaded(move || {
            if current_generation() != generation {
                log::debug!("Bootstrap superseded before window load");
                return;
            }
            drop(take_active());
            match Instance::attach(page, &config, generation) {
                Ok(instance) => install(instance),
                Err(e) => log::warn!("Floating footnotes disabled: {}", e),
            }
        });
        if let Err(e) = loaded {
            log::warn!("Could not wait for window load: {}", e);
        }
    })
}

/// Start floating footnotes manually
///
/// Replaces any running instance and cancels a pending auto-start. Disabling
/// the returned handle, or calling `disableFloatingFootnotes`, restores the
/// stacked layout.
#[wasm_bindgen(js_name = enableFloatingFootnotes)]
pub fn enable_floating_footnotes(config: JsValue) -> Result<FloatingFootnotes, JsValue> {
    let config = config_from_js(config)?;
    let generation = next_generation();
    // Tear the old instance down before the new one writes offsets
    drop(take_active());

    let page = locate_page(&config).map_err(to_js_error)?;
    let instance = Instance::attach(page, &config, generation).map_err(to_js_error)?;
    install(instance);
    Ok(FloatingFootnotes { generation })
}

/// Tear down the running instance and cancel a pending auto-start
#[wasm_bindgen(js_name = disableFloatingFootnotes)]
pub fn disable_floating_footnotes() {
    next_generation();
    if take_active().is_some() {
        log::info!("Floating footnotes disabled");
    }
}

/// Insert heading anchors on demand
#[wasm_bindgen(js_name = anchorizeHeadings)]
pub fn anchorize_headings(config: JsValue) -> Result<usize, JsValue> {
    let config = config_from_js(config)?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| to_js_error(FootnoteError::MissingStructure("document".to_string())))?;
    dom::anchorize_headings(&document, &config).map_err(to_js_error)
}
