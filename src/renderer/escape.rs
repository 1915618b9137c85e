//! Markup escaping

/// Escape text content: `&` (first, so entities are not escaped twice), `<`, `>`
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value
pub fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Attribute key as written: trailing underscores are dropped so keys like
/// `class_` or `for_` can stand in for reserved words
pub fn attribute_key(key: &str) -> &str {
    key.trim_end_matches('_')
}
