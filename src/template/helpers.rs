//! Constructors for deferred nodes

use crate::context::Context;
use crate::error::BindError;
use crate::node::Node;
use crate::value::Value;

use super::deferred::{Cond, Deferred, Loop, LoopKeys, Predicate, Resolver, Source};

/// Defer to an arbitrary closure over the context
///
/// Whatever the closure returns is bound in turn, so it may return plain data
/// or another template fragment.
pub fn defer<F>(func: F) -> Deferred
where
    F: Fn(&Context) -> Result<Value, BindError> + Send + Sync + 'static,
{
    Deferred::Resolver(Resolver::new(func))
}

/// Look up `key`; binding fails with [`BindError::MissingKey`] if it is absent
pub fn from_context(key: impl Into<String>) -> Deferred {
    Deferred::Lookup {
        key: key.into(),
        default: None,
    }
}

/// Look up `key`, falling back to `default` if it is absent
pub fn from_context_or(key: impl Into<String>, default: impl Into<Value>) -> Deferred {
    Deferred::Lookup {
        key: key.into(),
        default: Some(default.into()),
    }
}

/// Walk `keys` through nested maps; any miss along the way counts as absent
pub fn from_nested_context<I, S>(keys: I) -> Deferred
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Deferred::NestedLookup {
        keys: keys.into_iter().map(Into::into).collect(),
        default: None,
    }
}

/// Like [`from_nested_context`], falling back to `default`
pub fn from_nested_context_or<I, S>(keys: I, default: impl Into<Value>) -> Deferred
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Deferred::NestedLookup {
        keys: keys.into_iter().map(Into::into).collect(),
        default: Some(default.into()),
    }
}

/// Fill `{key}` placeholders in `template` from the context
///
/// `{{` and `}}` produce literal braces; `{a.b}` walks nested maps.
pub fn format_context(template: impl Into<String>) -> Deferred {
    Deferred::Format {
        template: template.into(),
    }
}

/// Include `affirmative` if the predicate holds; otherwise nothing
pub fn cond(predicate: impl Into<Predicate>, affirmative: impl Into<Node>) -> Deferred {
    Deferred::Cond(Box::new(Cond {
        predicate: predicate.into(),
        affirmative: affirmative.into(),
        negative: None,
    }))
}

/// Include `affirmative` if the predicate holds, `negative` otherwise
pub fn cond_else(
    predicate: impl Into<Predicate>,
    affirmative: impl Into<Node>,
    negative: impl Into<Node>,
) -> Deferred {
    Deferred::Cond(Box::new(Cond {
        predicate: predicate.into(),
        affirmative: affirmative.into(),
        negative: Some(negative.into()),
    }))
}

/// Render `template` once per item of `source`, with each item bound to `keys`
pub fn loop_(
    keys: impl Into<LoopKeys>,
    source: impl Into<Source>,
    template: impl Into<Node>,
) -> Deferred {
    Deferred::Loop(Box::new(Loop {
        keys: keys.into(),
        source: source.into(),
        template: template.into(),
    }))
}

/// Pair each item with its index, for destructuring loops over `[i, item]`
pub fn enumerate<I>(items: I) -> impl Iterator<Item = Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| Value::List(vec![Value::from(i), item.into()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_forms() {
        assert_eq!(format!("{:?}", from_context("name")), r#"from_context("name")"#);
        assert_eq!(
            format!("{:?}", from_nested_context(["a", "b"])),
            r#"from_nested_context(["a", "b"])"#
        );
        assert_eq!(
            format!("{:?}", format_context("Hi {name}")),
            r#"format_context("Hi {name}")"#
        );
        assert_eq!(
            format!("{:?}", cond("admin", "yes")),
            r#"cond("admin", "yes")"#
        );
        assert_eq!(
            format!("{:?}", loop_("x", "items", from_context("x"))),
            r#"loop("x", "items", from_context("x"))"#
        );
    }

    #[test]
    fn test_enumerate() {
        let pairs: Vec<Value> = enumerate(["apple", "pear"]).collect();
        assert_eq!(pairs[1], Value::from(vec![Value::from(1), Value::from("pear")]));
    }
}
