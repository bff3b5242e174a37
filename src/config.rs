//! Configuration for footnote floating
//!
//! All selectors and thresholds live here. Defaults match the markup produced
//! by kramdown-style Markdown renderers (`fn:N` footnote ids, `footnote-ref`
//! citation links).

use serde::{Deserialize, Serialize};

use crate::error::FootnoteError;

/// Minimum viewport width (CSS pixels, inclusive) at which footnotes float
pub const DEFAULT_MIN_WIDTH: f64 = 1260.0;

/// Placeholder replaced by the footnote id in `reference_selector_template`
pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FootnoteConfig {
    /// Article content region, observed for size changes while floating
    pub article_selector: String,

    /// Footnote container; receives the floating class
    pub container_selector: String,

    /// Individual footnote entries, queried inside the container
    pub footnote_selector: String,

    /// In-text citation of a footnote, `{id}` is replaced by the footnote id
    pub reference_selector_template: String,

    /// Block-level ancestors a citation is aligned by
    pub alignment_selector: String,

    /// Viewport width at or above which footnotes float
    pub min_width: f64,

    /// Class toggled on the container while floating
    pub floating_class: String,

    /// Class on the article that disables the feature for that page
    pub opt_out_class: String,

    /// Headings that receive an anchor link
    pub heading_selector: String,

    /// Whether heading anchors are inserted at bootstrap
    pub anchor_headings: bool,

    /// `log` level name used when the console logger is installed
    pub log_level: String,
}

impl Default for FootnoteConfig {
    fn default() -> Self {
        Self {
            article_selector: "article#main".to_string(),
            container_selector: "div.footnotes[role=doc-endnotes]".to_string(),
            footnote_selector: "li[id^='fn:']".to_string(),
            reference_selector_template: "a.footnote-ref[href='#{id}']".to_string(),
            alignment_selector: "p,li".to_string(),
            min_width: DEFAULT_MIN_WIDTH,
            floating_class: "floating-footnotes".to_string(),
            opt_out_class: "no-floating-footnotes".to_string(),
            heading_selector: "h2, h3, h4".to_string(),
            anchor_headings: true,
            log_level: "info".to_string(),
        }
    }
}

impl FootnoteConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, FootnoteError> {
        let config: FootnoteConfig = serde_json::from_str(json)
            .map_err(|e| FootnoteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FootnoteError> {
        let selectors = [
            ("articleSelector", &self.article_selector),
            ("containerSelector", &self.container_selector),
            ("footnoteSelector", &self.footnote_selector),
            ("referenceSelectorTemplate", &self.reference_selector_template),
            ("alignmentSelector", &self.alignment_selector),
            ("floatingClass", &self.floating_class),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(FootnoteError::Config(format!("{} must not be empty", name)));
            }
        }

        if !self.reference_selector_template.contains(ID_PLACEHOLDER) {
            return Err(FootnoteError::Config(format!(
                "referenceSelectorTemplate '{}' has no {} placeholder",
                self.reference_selector_template, ID_PLACEHOLDER
            )));
        }

        if !self.min_width.is_finite() || self.min_width <= 0.0 {
            return Err(FootnoteError::Config(format!(
                "minWidth must be a positive number, got {}",
                self.min_width
            )));
        }

        if self.level_filter().is_none() {
            return Err(FootnoteError::Config(format!(
                "Unknown logLevel '{}'",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Width-crossing predicate; the threshold itself counts as wide enough
    pub fn should_float(&self, viewport_width: f64) -> bool {
        viewport_width >= self.min_width
    }

    /// Selector locating the in-text citation of `footnote_id`
    pub fn reference_selector(&self, footnote_id: &str) -> String {
        self.reference_selector_template
            .replace(ID_PLACEHOLDER, &escape_attribute_value(footnote_id))
    }

    pub fn level_filter(&self) -> Option<log::Level> {
        self.log_level.parse::<log::Level>().ok()
    }
}

/// Escape a value for use inside a quoted CSS attribute selector
fn escape_attribute_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '\'' | '"' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\a "),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let config = FootnoteConfig::default();
        assert!(config.should_float(1260.0));
        assert!(config.should_float(1920.0));
        assert!(!config.should_float(1259.5));
    }

    #[test]
    fn test_reference_selector_for_kramdown_ids() {
        let config = FootnoteConfig::default();
        assert_eq!(
            config.reference_selector("fn:2"),
            "a.footnote-ref[href='#fn:2']"
        );
    }

    #[test]
    fn test_reference_selector_escapes_quotes() {
        let config = FootnoteConfig::default();
        assert_eq!(
            config.reference_selector("fn:it's"),
            "a.footnote-ref[href='#fn:it\\'s']"
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FootnoteConfig::from_json(r#"{"minWidth": 1000, "anchorHeadings": false}"#)
            .expect("partial config should parse");
        assert_eq!(config.min_width, 1000.0);
        assert!(!config.anchor_headings);
        assert_eq!(config.floating_class, "floating-footnotes");
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let err = FootnoteConfig::from_json(r#"{"referenceSelectorTemplate": "a.footnote-ref"}"#)
            .unwrap_err();
        assert!(matches!(err, FootnoteError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let config = FootnoteConfig {
            min_width: 0.0,
            ..FootnoteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(FootnoteConfig::from_json(r#"{"logLevel": "loud"}"#).is_err());
        assert!(FootnoteConfig::from_json(r#"{"logLevel": "debug"}"#).is_ok());
    }
}
