//! Browser implementation of the footnote surfaces
//!
//! Structure (article region, footnote container) is located once. Footnote
//! entries, their citations and all geometry are queried live on every call.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::observer::ContentSubscription;
use crate::config::FootnoteConfig;
use crate::error::FootnoteError;
use crate::layout::{ArticleSurface, FootnoteGeometry};
use crate::utils::css::{format_px, parse_px};

pub struct DomArticle {
    window: Window,
    document: Document,
    article: Element,
    container: Element,
    config: FootnoteConfig,
    on_content_change: Rc<dyn Fn()>,
}

impl DomArticle {
    /// Locate the article region and footnote container in the current page
    pub fn locate(config: &FootnoteConfig) -> Result<Self, FootnoteError> {
        let window = web_sys::window()
            .ok_or_else(|| FootnoteError::MissingStructure("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| FootnoteError::MissingStructure("document".to_string()))?;

        let container = query_required(&document, &config.container_selector)?;
        let article = query_required(&document, &config.article_selector)?;

        Ok(Self {
            window,
            document,
            article,
            container,
            config: config.clone(),
            on_content_change: Rc::new(|| {}),
        })
    }

    /// Callback invoked when the observed article region changes size
    pub fn with_content_listener(mut self, listener: Rc<dyn Fn()>) -> Self {
        self.on_content_change = listener;
        self
    }

    /// Whether the article carries the opt-out class
    pub fn is_opted_out(&self) -> bool {
        !self.config.opt_out_class.is_empty()
            && self.article.class_list().contains(&self.config.opt_out_class)
    }

    pub fn viewport_width(&self) -> f64 {
        viewport_width(&self.window)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    fn alignment_target(&self, reference: Element) -> Element {
        match reference.closest(&self.config.alignment_selector) {
            Ok(Some(block)) => block,
            _ => reference,
        }
    }
}

impl FootnoteGeometry for DomArticle {
    type Note = HtmlElement;

    fn footnotes(&self) -> Result<Vec<HtmlElement>, FootnoteError> {
        let nodes = self
            .container
            .query_selector_all(&self.config.footnote_selector)
            .map_err(|e| FootnoteError::from_js("footnote query failed", &e))?;

        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    fn note_id(&self, note: &HtmlElement) -> String {
        note.id()
    }

    fn alignment_top(&self, note: &HtmlElement) -> Result<f64, FootnoteError> {
        let id = note.id();
        let selector = self.config.reference_selector(&id);
        let reference = match self.document.query_selector(&selector) {
            Ok(Some(reference)) => reference,
            Ok(None) => return Err(FootnoteError::UnresolvedReference(id)),
            Err(e) => {
                log::debug!("Reference selector '{}' rejected: {:?}", selector, e);
                return Err(FootnoteError::UnresolvedReference(id));
            }
        };

        let origin = note
            .offset_parent()
            .ok_or_else(|| FootnoteError::MissingPositioningContext(id))?;
        let target = self.alignment_target(reference);

        Ok(target.get_bounding_client_rect().top() - origin.get_bounding_client_rect().top())
    }

    fn extent(&self, note: &HtmlElement) -> f64 {
        let height = note.offset_height() as f64;
        let margins = match self.window.get_computed_style(note) {
            Ok(Some(style)) => ["margin-top", "margin-bottom"]
                .iter()
                .map(|property| {
                    style
                        .get_property_value(property)
                        .map(|value| parse_px(&value))
                        .unwrap_or(0.0)
                })
                .sum::<f64>(),
            _ => 0.0,
        };
        height + margins
    }

    fn set_offset(&self, note: &HtmlElement, offset: f64) -> Result<(), FootnoteError> {
        let style = note.style();
        style
            .set_property("top", &format_px(offset))
            .and_then(|_| style.set_property("position", "absolute"))
            .map_err(|e| FootnoteError::from_js("setting footnote offset failed", &e))
    }

    fn clear_offset(&self, note: &HtmlElement) -> Result<(), FootnoteError> {
        let style = note.style();
        style
            .remove_property("top")
            .and_then(|_| style.remove_property("position"))
            .map(|_| ())
            .map_err(|e| FootnoteError::from_js("clearing footnote offset failed", &e))
    }

    fn now_ms(&self) -> Option<f64> {
        self.window.performance().map(|p| p.now())
    }
}

impl ArticleSurface for DomArticle {
    type Subscription = ContentSubscription;

    fn set_floating_flag(&self, floating: bool) -> Result<(), FootnoteError> {
        let classes = self.container.class_list();
        let result = if floating {
            classes.add_1(&self.config.floating_class)
        } else {
            classes.remove_1(&self.config.floating_class)
        };
        result.map_err(|e| FootnoteError::from_js("toggling floating class failed", &e))
    }

    fn observe_content(&self) -> Result<ContentSubscription, FootnoteError> {
        ContentSubscription::observe(&self.article, self.on_content_change.clone())
    }
}

/// Current layout viewport width in CSS pixels
pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

fn query_required(document: &Document, selector: &str) -> Result<Element, FootnoteError> {
    document
        .query_selector(selector)
        .map_err(|e| FootnoteError::from_js(selector, &e))?
        .ok_or_else(|| FootnoteError::MissingStructure(selector.to_string()))
}
