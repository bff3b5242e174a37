//! Heading anchor links
//!
//! Appends a small link icon to each section heading so readers can copy a
//! link to that section. Independent of footnote floating.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::config::FootnoteConfig;
use crate::error::FootnoteError;

pub const HEADER_LINK_CLASS: &str = "header-link";
pub const HEADER_LINK_TITLE: &str = "Link to this section";

/// Open Iconic "link-intact", 8x8
pub const LINK_ICON_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 8 8"><path d="M5.88.03c-.18.01-.36.03-.53.09-.27.1-.53.25-.75.47a.5.5 0 1 0 .69.69c.11-.11.24-.17.38-.22.35-.12.78-.07 1.06.22.39.39.39 1.04 0 1.44l-1.5 1.5c-.44.44-.8.48-1.06.47-.26-.01-.41-.13-.41-.13a.5.5 0 1 0-.5.88s.34.22.84.25c.5.03 1.2-.16 1.81-.78l1.5-1.5c.78-.78.78-2.04 0-2.81-.28-.28-.61-.45-.97-.53-.18-.04-.38-.04-.56-.03zm-2 2.31c-.5-.02-1.19.15-1.78.75l-1.5 1.5c-.78.78-.78 2.04 0 2.81.56.56 1.36.72 2.06.47.27-.1.53-.25.75-.47a.5.5 0 1 0-.69-.69c-.11.11-.24.17-.38.22-.35.12-.78.07-1.06-.22-.39-.39-.39-1.04 0-1.44l1.5-1.5c.4-.4.75-.45 1.03-.44.28.01.47.09.47.09a.5.5 0 1 0 .44-.88s-.34-.2-.84-.22z"/>"#,
    "</svg>"
);

/// Link target for a heading id
pub fn anchor_href(id: &str) -> String {
    format!("#{}", id)
}

fn anchor_for_id(document: &Document, id: &str) -> Result<Element, FootnoteError> {
    let anchor = document
        .create_element("a")
        .map_err(|e| FootnoteError::from_js("creating heading anchor failed", &e))?;
    anchor.set_class_name(HEADER_LINK_CLASS);
    anchor
        .set_attribute("title", HEADER_LINK_TITLE)
        .and_then(|_| anchor.set_attribute("href", &anchor_href(id)))
        .map_err(|e| FootnoteError::from_js("setting heading anchor attributes failed", &e))?;
    anchor.set_inner_html(LINK_ICON_SVG);
    Ok(anchor)
}

/// Append anchor links to the headings of the page's single article
///
/// Pages with zero or several article regions are left untouched, as are
/// headings without an id or that already carry a link. Returns the number of
/// anchors added.
pub fn anchorize_headings(document: &Document, config: &FootnoteConfig) -> Result<usize, FootnoteError> {
    let articles = document
        .query_selector_all(&config.article_selector)
        .map_err(|e| FootnoteError::from_js("article query failed", &e))?;
    if articles.length() != 1 {
        log::debug!("Found {} article regions, not anchoring headings", articles.length());
        return Ok(0);
    }
    let Some(article) = articles.item(0).and_then(|node| node.dyn_into::<Element>().ok()) else {
        return Ok(0);
    };

    let headings = article
        .query_selector_all(&config.heading_selector)
        .map_err(|e| FootnoteError::from_js("heading query failed", &e))?;
    let existing_link = format!(":scope > a.{}", HEADER_LINK_CLASS);

    let mut added = 0;
    for heading in (0..headings.length())
        .filter_map(|i| headings.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
    {
        let id = heading.id();
        if id.is_empty() {
            continue;
        }
        if let Ok(Some(_)) = heading.query_selector(&existing_link) {
            continue;
        }
        let anchor = anchor_for_id(document, &id)?;
        heading
            .append_child(&anchor)
            .map_err(|e| FootnoteError::from_js("appending heading anchor failed", &e))?;
        added += 1;
    }

    log::debug!("Added {} heading anchors", added);
    Ok(added)
}
