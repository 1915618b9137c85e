//! Error types for binding, rendering and context loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while binding a template against a context
///
/// Any of these aborts the whole bind call; no partial tree is produced.
#[derive(Debug, Error)]
pub enum BindError {
    /// A lookup or placeholder named a key the context does not have
    #[error("missing context key '{key}'")]
    MissingKey { key: String },

    /// A destructuring loop item has more values than loop variables
    #[error("too many values to unpack (expected {expected}, got {found})")]
    TooManyValues { expected: usize, found: usize },

    /// A destructuring loop item has fewer values than loop variables
    #[error("not enough values to unpack (expected {expected}, got {found})")]
    TooFewValues { expected: usize, found: usize },

    /// A loop source key does not hold a sequence
    #[error("context key '{key}' holds a {kind}, not a sequence")]
    NotIterable { key: String, kind: &'static str },

    /// A loop item cannot be split across several loop variables
    #[error("cannot destructure a {kind} into {expected} loop variables")]
    NotDestructurable { kind: &'static str, expected: usize },

    /// A resolved value has no markup representation in its position
    #[error("a {kind} cannot be rendered as {position}")]
    NotRenderable {
        kind: &'static str,
        position: &'static str,
    },

    /// Format string with unbalanced braces or an empty placeholder
    #[error("malformed format string '{template}': {reason}")]
    MalformedFormat { template: String, reason: String },

    /// Template nesting went deeper than the configured limit
    #[error("template nesting exceeds the depth limit of {limit}")]
    DepthLimit { limit: usize },

    /// Raised by a user supplied resolver
    #[error("{message}")]
    Custom { message: String },
}

impl BindError {
    /// Create a missing key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create an error for a value that has no representation at `position`
    pub fn not_renderable(kind: &'static str, position: &'static str) -> Self {
        Self::NotRenderable { kind, position }
    }

    /// Create a malformed format string error
    pub fn malformed(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedFormat {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Create an error from a resolver's own message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// The missing key, if this is a missing key error
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey { key } => Some(key),
            Self::NotIterable { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Errors that can occur while serializing a tree to markup
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tree still contains a deferred node
    #[error("unbound {resolver}: bind the template before serializing it")]
    UnboundDeferred { resolver: String },

    /// Writing the markup to its destination failed
    #[error("failed to write markup: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading a context or configuration file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}
