//! tagbind - build XML/HTML documents as trees, with deferred parts bound later
//!
//! Trees are assembled from [`Element`]s, text and [`Deferred`] placeholders.
//! A template is bound against a [`Context`] to produce a concrete tree, which
//! is then serialized to markup. Templates are never modified by binding, so
//! one template can serve any number of renders.
//!
//! # Example
//!
//! ```rust
//! use tagbind::{nodes, render, Context, Element};
//! use tagbind::template::from_context;
//!
//! let template = Element::new("doc")
//!     .child(Element::new("p").with_children(nodes!["Hello ", from_context("name"), "!"]))
//!     .child("foo");
//!
//! let ctx = Context::new().with("name", "Fred");
//! let out = render(&template.into(), &ctx).unwrap();
//! assert_eq!(out, "<doc><p>Hello Fred!</p>foo</doc>");
//! ```

pub mod context;
pub mod error;
pub mod html;
pub mod node;
pub mod renderer;
pub mod template;
pub mod value;

pub use context::Context;
pub use error::{BindError, LoadError, RenderError};
pub use node::{AttrValue, Attribute, Element, Node, Text};
pub use renderer::{serialize, serialize_with_config, MarkupConfig, SelfClosingStyle};
pub use template::{bind, bind_with_config, BindConfig, Deferred};
pub use value::Value;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Build a `Vec<Node>` from mixed children
///
/// ```rust
/// use tagbind::{nodes, Element};
///
/// let p = Element::new("p").with_children(nodes!["a", Element::new("br/"), "b"]);
/// assert_eq!(p.serialize().unwrap(), "<p>a<br/>b</p>");
/// ```
#[macro_export]
macro_rules! nodes {
    ($($child:expr),* $(,)?) => {
        vec![$($crate::Node::from($child)),*]
    };
}

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error while binding
    #[error("bind error: {0}")]
    Bind(#[from] BindError),

    /// Error while serializing
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Error loading a context or configuration
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Binding configuration
    pub bind: BindConfig,
    /// Markup output configuration
    pub markup: MarkupConfig,
}

/// TOML structure for deserializing render configuration
#[derive(Deserialize)]
struct TomlRenderConfig {
    bind: Option<TomlBind>,
    markup: Option<TomlMarkup>,
}

#[derive(Deserialize)]
struct TomlBind {
    max_depth: Option<usize>,
}

#[derive(Deserialize)]
struct TomlMarkup {
    escape_attributes: Option<bool>,
    self_closing_style: Option<SelfClosingStyle>,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binding configuration
    pub fn with_bind(mut self, config: BindConfig) -> Self {
        self.bind = config;
        self
    }

    /// Set the markup configuration
    pub fn with_markup(mut self, config: MarkupConfig) -> Self {
        self.markup = config;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; absent settings keep defaults
    ///
    /// ```toml
    /// [bind]
    /// max_depth = 256
    ///
    /// [markup]
    /// escape_attributes = true
    /// self_closing_style = "html"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        let parsed: TomlRenderConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(bind) = parsed.bind {
            config.bind.max_depth = bind.max_depth;
        }
        if let Some(markup) = parsed.markup {
            if let Some(escape) = markup.escape_attributes {
                config.markup.escape_attributes = escape;
            }
            if let Some(style) = markup.self_closing_style {
                config.markup.self_closing_style = style;
            }
        }

        Ok(config)
    }
}

/// Bind `template` against `ctx` and serialize the result
///
/// This is the main entry point for the library.
pub fn render(template: &Node, ctx: &Context) -> Result<String, Error> {
    render_with_config(template, ctx, &RenderConfig::default())
}

/// Bind and serialize with a custom configuration
pub fn render_with_config(
    template: &Node,
    ctx: &Context,
    config: &RenderConfig,
) -> Result<String, Error> {
    let bound = bind_with_config(template, ctx, &config.bind)?;
    Ok(serialize_with_config(&bound, &config.markup)?)
}
