//! Deferred nodes
//!
//! A [`Deferred`] stands in for a part of the tree whose content depends on the
//! binding context. The variants are closed: each built-in helper has its own
//! variant, and arbitrary logic goes through [`Deferred::Resolver`].

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::BindError;
use crate::node::Node;
use crate::value::Value;

type ResolveFn = dyn Fn(&Context) -> Result<Value, BindError> + Send + Sync;
type PredicateFn = dyn Fn(&Context) -> bool + Send + Sync;
type SourceFn = dyn Fn(&Context) -> Result<ValueIter, BindError> + Send + Sync;

/// Iterator over loop items, consumed once per bind
pub type ValueIter = Box<dyn Iterator<Item = Value>>;

/// A placeholder resolved against a context at bind time
#[derive(Clone)]
pub enum Deferred {
    /// User supplied resolver
    Resolver(Resolver),
    /// Single key lookup
    Lookup { key: String, default: Option<Value> },
    /// Key path through nested maps
    NestedLookup {
        keys: Vec<String>,
        default: Option<Value>,
    },
    /// `{key}` interpolation into a format string
    Format { template: String },
    /// Conditional inclusion
    Cond(Box<Cond>),
    /// Repetition over a sequence
    Loop(Box<Loop>),
}

impl Deferred {
    /// Short description used in errors and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Deferred::Resolver(_) => "defer",
            Deferred::Lookup { .. } => "from_context",
            Deferred::NestedLookup { .. } => "from_nested_context",
            Deferred::Format { .. } => "format_context",
            Deferred::Cond(_) => "cond",
            Deferred::Loop(_) => "loop",
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deferred::Resolver(r) => write!(f, "defer({})", r.name()),
            Deferred::Lookup { key, default } => match default {
                Some(d) => write!(f, "from_context({:?}, {:?})", key, d),
                None => write!(f, "from_context({:?})", key),
            },
            Deferred::NestedLookup { keys, default } => match default {
                Some(d) => write!(f, "from_nested_context({:?}, {:?})", keys, d),
                None => write!(f, "from_nested_context({:?})", keys),
            },
            Deferred::Format { template } => write!(f, "format_context({:?})", template),
            Deferred::Cond(c) => {
                write!(f, "cond({:?}, {:?}", c.predicate, c.affirmative)?;
                if let Some(negative) = &c.negative {
                    write!(f, ", {:?}", negative)?;
                }
                f.write_str(")")
            }
            Deferred::Loop(l) => {
                write!(f, "loop({:?}, {:?}, {:?})", l.keys, l.source, l.template)
            }
        }
    }
}

/// A named closure producing a value from the context
#[derive(Clone)]
pub struct Resolver {
    name: Option<String>,
    func: Arc<ResolveFn>,
}

impl Resolver {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Context) -> Result<Value, BindError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Attach a name shown in debug output and unbound-node errors
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<closure>")
    }

    pub fn resolve(&self, ctx: &Context) -> Result<Value, BindError> {
        (self.func)(ctx)
    }
}

/// Condition of a [`Cond`]: a closure, or the truthiness of a context key
#[derive(Clone)]
pub enum Predicate {
    Key(String),
    Func(Arc<PredicateFn>),
}

impl Predicate {
    pub fn key(key: impl Into<String>) -> Self {
        Predicate::Key(key.into())
    }

    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        Predicate::Func(Arc::new(func))
    }

    /// A missing key is an error rather than false
    pub fn evaluate(&self, ctx: &Context) -> Result<bool, BindError> {
        match self {
            Predicate::Key(key) => ctx
                .get(key)
                .map(Value::is_truthy)
                .ok_or_else(|| BindError::missing_key(key.as_str())),
            Predicate::Func(func) => Ok(func(ctx)),
        }
    }
}

impl From<&str> for Predicate {
    fn from(key: &str) -> Self {
        Predicate::key(key)
    }
}

impl From<String> for Predicate {
    fn from(key: String) -> Self {
        Predicate::Key(key)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Key(key) => write!(f, "{:?}", key),
            Predicate::Func(_) => f.write_str("<closure>"),
        }
    }
}

/// Where a loop takes its items from
#[derive(Clone)]
pub enum Source {
    /// A context key holding a list
    Key(String),
    /// A fixed list
    Values(Vec<Value>),
    /// A closure producing an iterator from the context
    Func(Arc<SourceFn>),
}

impl Source {
    pub fn key(key: impl Into<String>) -> Self {
        Source::Key(key.into())
    }

    /// Items produced by a closure; the iterator is consumed lazily, once
    pub fn from_fn<F, I>(func: F) -> Self
    where
        F: Fn(&Context) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Source::Func(Arc::new(move |ctx: &Context| -> Result<ValueIter, BindError> {
            Ok(Box::new(func(ctx).into_iter()))
        }))
    }

    /// Like [`Source::from_fn`], for closures that can fail
    pub fn try_from_fn<F, I>(func: F) -> Self
    where
        F: Fn(&Context) -> Result<I, BindError> + Send + Sync + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Source::Func(Arc::new(move |ctx: &Context| -> Result<ValueIter, BindError> {
            Ok(Box::new(func(ctx)?.into_iter()))
        }))
    }
}

impl From<&str> for Source {
    fn from(key: &str) -> Self {
        Source::key(key)
    }
}

impl From<String> for Source {
    fn from(key: String) -> Self {
        Source::Key(key)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Source {
    fn from(items: Vec<T>) -> Self {
        Source::Values(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Key(key) => write!(f, "{:?}", key),
            Source::Values(items) => write!(f, "{:?}", items),
            Source::Func(_) => f.write_str("<closure>"),
        }
    }
}

/// Loop variable names
///
/// A single name receives each item whole; a list of names destructures each
/// item, which must be a list of the same length.
#[derive(Clone, PartialEq, Eq)]
pub enum LoopKeys {
    Single(String),
    Destructure(Vec<String>),
}

impl LoopKeys {
    /// Derive the iteration context for one item
    pub fn scope(&self, ctx: &Context, item: &Value) -> Result<Context, BindError> {
        match self {
            LoopKeys::Single(key) => Ok(ctx.overlay([(key.as_str(), item.clone())])),
            LoopKeys::Destructure(keys) => {
                let values = item.as_list().ok_or(BindError::NotDestructurable {
                    kind: item.kind(),
                    expected: keys.len(),
                })?;
                if values.len() > keys.len() {
                    return Err(BindError::TooManyValues {
                        expected: keys.len(),
                        found: values.len(),
                    });
                }
                if values.len() < keys.len() {
                    return Err(BindError::TooFewValues {
                        expected: keys.len(),
                        found: values.len(),
                    });
                }
                Ok(ctx.overlay(
                    keys.iter()
                        .map(String::as_str)
                        .zip(values.iter().cloned()),
                ))
            }
        }
    }
}

impl From<&str> for LoopKeys {
    fn from(key: &str) -> Self {
        LoopKeys::Single(key.to_string())
    }
}

impl From<String> for LoopKeys {
    fn from(key: String) -> Self {
        LoopKeys::Single(key)
    }
}

impl<const N: usize> From<[&str; N]> for LoopKeys {
    fn from(keys: [&str; N]) -> Self {
        LoopKeys::Destructure(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl From<Vec<String>> for LoopKeys {
    fn from(keys: Vec<String>) -> Self {
        LoopKeys::Destructure(keys)
    }
}

impl fmt::Debug for LoopKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopKeys::Single(key) => write!(f, "{:?}", key),
            LoopKeys::Destructure(keys) => write!(f, "{:?}", keys),
        }
    }
}

/// Conditional inclusion of one of two branches
#[derive(Clone)]
pub struct Cond {
    pub predicate: Predicate,
    pub affirmative: Node,
    /// Branch taken when the predicate is false; nothing is rendered if absent
    pub negative: Option<Node>,
}

/// One rendering of `template` per item of `source`
#[derive(Clone)]
pub struct Loop {
    pub keys: LoopKeys,
    pub source: Source,
    pub template: Node,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key_binds_whole_item() {
        let ctx = Context::new();
        let item = Value::from(vec![1, 2]);
        let scope = LoopKeys::from("pair").scope(&ctx, &item).expect("Should bind");
        assert_eq!(scope.get("pair"), Some(&item));
    }

    #[test]
    fn test_destructure() {
        let ctx = Context::new().with("outer", "kept");
        let item = Value::from(vec![Value::from(0), Value::from("apple")]);
        let scope = LoopKeys::from(["i", "fruit"])
            .scope(&ctx, &item)
            .expect("Should bind");
        assert_eq!(scope.get("i"), Some(&Value::Int(0)));
        assert_eq!(scope.get("fruit"), Some(&Value::from("apple")));
        assert_eq!(scope.get("outer"), Some(&Value::from("kept")));
        assert!(ctx.get("i").is_none());
    }

    #[test]
    fn test_destructure_too_many() {
        let keys = LoopKeys::from(["a", "b"]);
        let result = keys.scope(&Context::new(), &Value::from(vec![1, 2, 3]));
        assert!(matches!(
            result,
            Err(BindError::TooManyValues {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_destructure_too_few() {
        let keys = LoopKeys::from(["a", "b"]);
        let result = keys.scope(&Context::new(), &Value::from(vec![1]));
        assert!(matches!(
            result,
            Err(BindError::TooFewValues {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_destructure_scalar() {
        let keys = LoopKeys::from(["a", "b"]);
        let result = keys.scope(&Context::new(), &Value::from("ab"));
        assert!(matches!(result, Err(BindError::NotDestructurable { .. })));
    }

    #[test]
    fn test_predicate_key() {
        let ctx = Context::new().with("admin", true).with("guest", "");
        assert!(Predicate::key("admin").evaluate(&ctx).expect("present"));
        assert!(!Predicate::key("guest").evaluate(&ctx).expect("present"));
        assert!(matches!(
            Predicate::key("nobody").evaluate(&ctx),
            Err(BindError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_resolver_name() {
        let r = Resolver::new(|_| Ok(Value::Null));
        assert_eq!(r.name(), "<closure>");
        assert_eq!(r.named("today").name(), "today");
    }
}
