//! Small helpers for computed CSS values

/// Parse a computed length such as `"12px"` or `"0.5px"`
///
/// Anything that is not a pixel length (`auto`, empty) counts as zero.
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    match number.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Format an offset for an inline `top` style
pub fn format_px(offset: f64) -> String {
    format!("{}px", offset)
}
