//! Markup serialization of concrete trees

use std::io::Write;

use tracing::debug;

use crate::error::RenderError;
use crate::node::{AttrValue, Element, Node};

use super::config::{MarkupConfig, SelfClosingStyle};
use super::escape::{attribute_key, escape_attribute, escape_text};

/// Build markup incrementally from a depth-first walk
pub struct MarkupBuilder<'a> {
    config: &'a MarkupConfig,
    out: String,
}

impl<'a> MarkupBuilder<'a> {
    /// Create a new builder
    pub fn new(config: &'a MarkupConfig) -> Self {
        Self {
            config,
            out: String::new(),
        }
    }

    /// Append a node and everything below it
    pub fn add_node(&mut self, node: &Node) -> Result<(), RenderError> {
        match node {
            Node::Element(e) => self.add_element(e),
            Node::Text(t) => {
                self.out.push_str(&escape_text(t.as_str()));
                Ok(())
            }
            Node::Raw(s) => {
                self.out.push_str(s);
                Ok(())
            }
            Node::Deferred(d) => Err(RenderError::UnboundDeferred {
                resolver: format!("{:?}", d),
            }),
        }
    }

    fn add_element(&mut self, element: &Element) -> Result<(), RenderError> {
        let name = match element.name() {
            Some(name) => name,
            None => {
                // Wrapper: children only
                for child in element.children() {
                    self.add_node(child)?;
                }
                return Ok(());
            }
        };

        self.out.push('<');
        self.out.push_str(name);
        self.add_attributes(element)?;

        if element.is_self_closing() && element.children().is_empty() {
            self.out.push_str(match self.config.self_closing_style {
                SelfClosingStyle::Xml => "/>",
                SelfClosingStyle::Html => ">",
            });
            return Ok(());
        }

        self.out.push('>');
        for child in element.children() {
            self.add_node(child)?;
        }
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        Ok(())
    }

    fn add_attributes(&mut self, element: &Element) -> Result<(), RenderError> {
        for attr in element.attributes() {
            let value = match &attr.value {
                AttrValue::Text(s) => s,
                AttrValue::Deferred(d) => {
                    return Err(RenderError::UnboundDeferred {
                        resolver: format!("{:?}", d),
                    })
                }
            };
            let value = if self.config.escape_attributes {
                escape_attribute(value)
            } else {
                value.clone()
            };
            self.out
                .push_str(&format!(r#" {}="{}""#, attribute_key(&attr.key), value));
        }
        Ok(())
    }

    /// Finish and return the markup
    pub fn build(self) -> String {
        self.out
    }
}

/// Serialize a concrete tree with the default configuration
///
/// Fails with [`RenderError::UnboundDeferred`] if a deferred node is still
/// reachable; bind the template first.
pub fn serialize(node: &Node) -> Result<String, RenderError> {
    serialize_with_config(node, &MarkupConfig::default())
}

/// Serialize a concrete tree with a custom configuration
pub fn serialize_with_config(node: &Node, config: &MarkupConfig) -> Result<String, RenderError> {
    debug!("serializing tree");
    let mut builder = MarkupBuilder::new(config);
    builder.add_node(node)?;
    Ok(builder.build())
}

/// Serialize a concrete tree into a writer
///
/// Nothing is written if the tree still contains a deferred node.
pub fn write_to(node: &Node, out: &mut impl Write, config: &MarkupConfig) -> Result<(), RenderError> {
    let markup = serialize_with_config(node, config)?;
    out.write_all(markup.as_bytes())?;
    Ok(())
}

impl Node {
    /// Serialize with the default configuration
    pub fn serialize(&self) -> Result<String, RenderError> {
        serialize(self)
    }
}

impl Element {
    /// Serialize with the default configuration
    pub fn serialize(&self) -> Result<String, RenderError> {
        let config = MarkupConfig::default();
        let mut builder = MarkupBuilder::new(&config);
        builder.add_element(self)?;
        Ok(builder.build())
    }
}
