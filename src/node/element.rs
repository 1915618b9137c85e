//! Elements and their attributes

use std::fmt;

use crate::renderer::escape::attribute_key;
use crate::template::Deferred;

use super::Node;

/// An attribute value: literal text or a placeholder resolved at bind time
///
/// A deferred value that resolves to nothing removes the attribute.
#[derive(Clone)]
pub enum AttrValue {
    Text(String),
    Deferred(Deferred),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Deferred(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<Deferred> for AttrValue {
    fn from(d: Deferred) -> Self {
        AttrValue::Deferred(d)
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{:?}", s),
            AttrValue::Deferred(d) => d.fmt(f),
        }
    }
}

/// A single attribute as stored on an element
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Key as given; trailing underscores are stripped on output
    pub key: String,
    pub value: AttrValue,
}

/// A markup element, or a nameless wrapper grouping its children
#[derive(Clone, Default)]
pub struct Element {
    name: Option<String>,
    self_closing: bool,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element; a trailing `/` marks it self-closing and is stripped
    ///
    /// An empty name makes a wrapper.
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        let self_closing = name.ends_with('/');
        if self_closing {
            name.pop();
        }
        Self {
            name: if name.is_empty() { None } else { Some(name) },
            self_closing,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a nameless wrapper that renders only its children
    pub fn wrapper() -> Self {
        Self::default()
    }

    /// Create an element with attributes; `None` values are dropped
    pub fn with_attrs<K, V, I>(name: impl Into<String>, attrs: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        attrs
            .into_iter()
            .fold(Self::new(name), |el, (k, v)| el.opt_attr(k, v))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_wrapper(&self) -> bool {
        self.name.is_none()
    }

    /// Whether the element was declared self-closing
    ///
    /// The flag only affects output while the element has no children.
    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get an attribute by key as given at construction
    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Set an attribute, replacing an existing one with the same key
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        // `class` and `class_` name the same attribute once written out
        match self
            .attributes
            .iter_mut()
            .find(|a| attribute_key(&a.key) == attribute_key(&key))
        {
            Some(existing) => *existing = Attribute { key, value },
            None => self.attributes.push(Attribute { key, value }),
        }
        self
    }

    /// Builder form of [`Element::set_attr`]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute if the value is present; `None` leaves it out
    pub fn opt_attr<V: Into<AttrValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    /// Append one child
    pub fn push(&mut self, child: impl Into<Node>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Append any number of children
    pub fn append<I>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Builder form of [`Element::push`]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    /// Builder form of [`Element::append`]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.append(children);
        self
    }

    /// True if no deferred node is reachable from this element
    pub fn is_concrete(&self) -> bool {
        self.attributes
            .iter()
            .all(|a| matches!(a.value, AttrValue::Text(_)))
            && self.children.iter().all(Node::is_concrete)
    }

    // Used by the binder to assemble a bound copy without re-parsing the name.
    pub(crate) fn rebuilt(&self, attributes: Vec<Attribute>, children: Vec<Node>) -> Self {
        Self {
            name: self.name.clone(),
            self_closing: self.self_closing,
            attributes,
            children,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            None => f.write_str("notag")?,
            Some(name) => {
                let marker = if self.self_closing && self.children.is_empty() {
                    "/"
                } else {
                    ""
                };
                write!(f, "tag({:?}", format!("{}{}", name, marker))?;
                for a in &self.attributes {
                    write!(f, ", {}={:?}", a.key, a.value)?;
                }
                f.write_str(")")?;
            }
        }
        if !self.children.is_empty() {
            f.write_str("(")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{:?}", child)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
