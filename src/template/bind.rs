//! Binding: resolve every deferred node in a template against a context
//!
//! Binding walks the template and builds a new tree; the template itself is
//! only read, so one template can be bound any number of times, from any
//! number of threads, each with its own context.

use tracing::{debug, trace};

use crate::context::Context;
use crate::error::BindError;
use crate::node::{AttrValue, Attribute, Element, Node};
use crate::value::Value;

use super::config::BindConfig;
use super::deferred::{Deferred, Source};
use super::format::interpolate;

/// Recursive binder; tracks depth against the configured limit
pub(crate) struct Binder<'c> {
    config: &'c BindConfig,
    depth: usize,
}

impl<'c> Binder<'c> {
    pub(crate) fn new(config: &'c BindConfig) -> Self {
        Self { config, depth: 0 }
    }

    fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, BindError>,
    ) -> Result<T, BindError> {
        if let Some(limit) = self.config.max_depth {
            if self.depth >= limit {
                return Err(BindError::DepthLimit { limit });
            }
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn node(&mut self, node: &Node, ctx: &Context) -> Result<Node, BindError> {
        self.descend(|b| match node {
            Node::Element(e) => b.element(e, ctx).map(Node::Element),
            Node::Text(t) => Ok(Node::Text(t.bind(ctx))),
            Node::Raw(s) => Ok(Node::Raw(s.clone())),
            Node::Deferred(d) => b.deferred(d, ctx),
        })
    }

    pub(crate) fn element(&mut self, element: &Element, ctx: &Context) -> Result<Element, BindError> {
        let mut attributes = Vec::with_capacity(element.attributes().len());
        for attr in element.attributes() {
            let value = match &attr.value {
                AttrValue::Text(s) => Some(AttrValue::Text(s.clone())),
                AttrValue::Deferred(d) => {
                    let bound = self.deferred(d, ctx)?;
                    attribute_text(&bound)?.map(AttrValue::Text)
                }
            };
            // A deferred value that resolved to nothing drops the attribute
            if let Some(value) = value {
                attributes.push(Attribute {
                    key: attr.key.clone(),
                    value,
                });
            }
        }

        let children = element
            .children()
            .iter()
            .map(|child| self.node(child, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(element.rebuilt(attributes, children))
    }

    pub(crate) fn deferred(&mut self, deferred: &Deferred, ctx: &Context) -> Result<Node, BindError> {
        trace!(kind = deferred.kind(), "resolving deferred node");
        match deferred {
            Deferred::Resolver(r) => {
                let value = r.resolve(ctx)?;
                self.value(&value, ctx)
            }
            Deferred::Lookup { key, default } => {
                let value = ctx
                    .get(key)
                    .or(default.as_ref())
                    .ok_or_else(|| BindError::missing_key(key.as_str()))?;
                self.value(value, ctx)
            }
            Deferred::NestedLookup { keys, default } => {
                let value = ctx
                    .get_path(keys.as_slice())
                    .or(default.as_ref())
                    .ok_or_else(|| BindError::missing_key(keys.join(".")))?;
                self.value(value, ctx)
            }
            Deferred::Format { template } => Ok(Node::text(interpolate(template, ctx)?)),
            Deferred::Cond(c) => {
                if c.predicate.evaluate(ctx)? {
                    self.node(&c.affirmative, ctx)
                } else {
                    match &c.negative {
                        Some(negative) => self.node(negative, ctx),
                        None => Ok(Node::empty()),
                    }
                }
            }
            Deferred::Loop(l) => {
                let mut out = Element::wrapper();
                let mut each = |binder: &mut Self, item: &Value| -> Result<(), BindError> {
                    let scope = l.keys.scope(ctx, item)?;
                    out.push(binder.node(&l.template, &scope)?);
                    Ok(())
                };
                match &l.source {
                    Source::Key(key) => {
                        let value = ctx
                            .get(key)
                            .ok_or_else(|| BindError::missing_key(key.as_str()))?;
                        let items = value.as_list().ok_or_else(|| BindError::NotIterable {
                            key: key.clone(),
                            kind: value.kind(),
                        })?;
                        for item in items {
                            each(&mut *self, item)?;
                        }
                    }
                    Source::Values(items) => {
                        for item in items {
                            each(&mut *self, item)?;
                        }
                    }
                    Source::Func(func) => {
                        for item in func(ctx)? {
                            each(&mut *self, &item)?;
                        }
                    }
                }
                debug!(iterations = out.children().len(), "loop bound");
                Ok(Node::Element(out))
            }
        }
    }

    /// Turn a resolved value into a node, binding any template it carries
    pub(crate) fn value(&mut self, value: &Value, ctx: &Context) -> Result<Node, BindError> {
        match value {
            Value::Null => Ok(Node::empty()),
            Value::Node(node) => self.node(node, ctx),
            Value::List(items) => self.descend(|b| {
                let children = items
                    .iter()
                    .map(|item| b.value(item, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Element(Element::wrapper().with_children(children)))
            }),
            Value::Map(_) => Err(BindError::not_renderable("map", "markup")),
            scalar => match scalar.to_text() {
                Some(text) => Ok(Node::text(text)),
                None => Err(BindError::not_renderable(scalar.kind(), "markup")),
            },
        }
    }
}

/// Flatten a bound node into an attribute value
///
/// Text and raw markup give their content, wrappers concatenate their
/// children, and an empty wrapper means the attribute is left out.
fn attribute_text(node: &Node) -> Result<Option<String>, BindError> {
    match node {
        Node::Text(t) => Ok(Some(t.as_str().to_string())),
        Node::Raw(s) => Ok(Some(s.clone())),
        Node::Element(e) if e.is_wrapper() => {
            let mut text: Option<String> = None;
            for child in e.children() {
                if let Some(part) = attribute_text(child)? {
                    text.get_or_insert_with(String::new).push_str(&part);
                }
            }
            Ok(text)
        }
        Node::Element(_) => Err(BindError::not_renderable("element", "an attribute value")),
        Node::Deferred(_) => Err(BindError::not_renderable("deferred node", "an attribute value")),
    }
}

impl Node {
    /// Bind with the default configuration, producing a new concrete node
    pub fn bind(&self, ctx: &Context) -> Result<Node, BindError> {
        Binder::new(&BindConfig::default()).node(self, ctx)
    }
}

impl Element {
    /// Bind attributes and children, producing a new element of the same name
    pub fn bind(&self, ctx: &Context) -> Result<Element, BindError> {
        Binder::new(&BindConfig::default()).element(self, ctx)
    }
}

impl Deferred {
    /// Resolve this placeholder and bind whatever it resolves to
    pub fn bind(&self, ctx: &Context) -> Result<Node, BindError> {
        Binder::new(&BindConfig::default()).deferred(self, ctx)
    }
}
