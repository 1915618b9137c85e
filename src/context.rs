//! Binding context
//!
//! A [`Context`] maps string keys to [`Value`]s. It is cheap to clone and is
//! never mutated once shared: loop iterations derive child contexts with
//! [`Context::overlay`], which layers new keys over a reference to the parent
//! instead of copying or touching it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::LoadError;
use crate::value::Value;

/// Copy-on-write mapping consulted while binding a template
#[derive(Clone, Default)]
pub struct Context {
    scope: Arc<Scope>,
}

#[derive(Clone, Default)]
struct Scope {
    vars: BTreeMap<String, Value>,
    parent: Option<Context>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a context from a TOML document; the top-level table becomes the keys
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        let vars: BTreeMap<String, Value> = toml::from_str(content)?;
        Ok(Self::from_vars(vars))
    }

    /// Load a context from a JSON object
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let vars: BTreeMap<String, Value> = serde_json::from_str(content)?;
        Ok(Self::from_vars(vars))
    }

    /// Load a context from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    fn from_vars(vars: BTreeMap<String, Value>) -> Self {
        Self {
            scope: Arc::new(Scope { vars, parent: None }),
        }
    }

    /// Insert a key, copying the local scope first if it is shared
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.scope)
            .vars
            .insert(key.into(), value.into());
    }

    /// Builder form of [`Context::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a value, checking enclosing scopes
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scope
            .vars
            .get(key)
            .or_else(|| self.scope.parent.as_ref().and_then(|p| p.get(key)))
    }

    /// Check whether a key is visible from this scope
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Get a nested value: the first key in the context, the rest through
    /// nested maps and lists
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        self.get(first.as_ref()).and_then(|v| v.get_path(rest))
    }

    /// Derive a child context with `vars` layered over this one
    ///
    /// `self` is left untouched and stays shared with the child.
    pub fn overlay<K, V, I>(&self, vars: I) -> Context
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Context {
            scope: Arc::new(Scope {
                vars: vars
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// All visible keys and values, inner scopes shadowing outer ones
    pub fn flatten(&self) -> BTreeMap<&str, &Value> {
        let mut out = match &self.scope.parent {
            Some(parent) => parent.flatten(),
            None => BTreeMap::new(),
        };
        for (k, v) in &self.scope.vars {
            out.insert(k.as_str(), v);
        }
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_vars(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.flatten()).finish()
    }
}
