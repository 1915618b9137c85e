//! Configuration for markup output

use serde::Deserialize;

/// How childless self-closing elements are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfClosingStyle {
    /// `<br/>`
    #[default]
    Xml,
    /// `<br>`
    Html,
}

/// Configuration options for markup output
#[derive(Debug, Clone)]
pub struct MarkupConfig {
    /// Escape `&`, `<`, `>` and `"` in attribute values
    pub escape_attributes: bool,

    /// Output form of childless self-closing elements
    pub self_closing_style: SelfClosingStyle,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            escape_attributes: true,
            self_closing_style: SelfClosingStyle::Xml,
        }
    }
}

impl MarkupConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether attribute values are escaped
    pub fn with_escape_attributes(mut self, escape: bool) -> Self {
        self.escape_attributes = escape;
        self
    }

    /// Set the self-closing element style
    pub fn with_self_closing_style(mut self, style: SelfClosingStyle) -> Self {
        self.self_closing_style = style;
        self
    }
}
