//! Configuration for the binding engine

/// Configuration options for binding
#[derive(Debug, Clone, Default)]
pub struct BindConfig {
    /// Maximum nesting depth of nodes and resolved values; unbounded if `None`
    pub max_depth: Option<usize>,
}

impl BindConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound recursion depth, guarding against self-referential resolvers
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
