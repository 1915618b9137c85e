//! Markup tree nodes
//!
//! A tree is made of [`Node`]s: elements (named, or nameless wrappers that only
//! group their children), escaped text, raw pre-serialized markup, and deferred
//! placeholders that are resolved by [`bind`](crate::bind).

mod element;

pub use element::{AttrValue, Attribute, Element};

use std::fmt;

use crate::context::Context;
use crate::template::Deferred;

/// A node in a markup tree or template
#[derive(Clone)]
pub enum Node {
    Element(Element),
    Text(Text),
    /// Markup emitted verbatim, never escaped
    Raw(String),
    /// Placeholder resolved at bind time
    Deferred(Deferred),
}

impl Node {
    /// Create a text node
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(Text::new(s))
    }

    /// Create a raw markup node
    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    /// An empty wrapper; renders nothing
    pub fn empty() -> Self {
        Node::Element(Element::wrapper())
    }

    /// True if no deferred node is reachable from here
    pub fn is_concrete(&self) -> bool {
        match self {
            Node::Element(e) => e.is_concrete(),
            Node::Text(_) | Node::Raw(_) => true,
            Node::Deferred(_) => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Deferred> for Node {
    fn from(deferred: Deferred) -> Self {
        Node::Deferred(deferred)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::text(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::text(s)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::text(s.as_str())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => e.fmt(f),
            Node::Text(t) => t.fmt(f),
            Node::Raw(s) => write!(f, "raw({:?})", s),
            Node::Deferred(d) => d.fmt(f),
        }
    }
}

/// A text leaf; its content is escaped when serialized
#[derive(Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    pub fn new(s: impl Into<String>) -> Self {
        Text(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text never contains deferred content, so binding is identity
    pub fn bind(&self, _ctx: &Context) -> Text {
        self.clone()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
