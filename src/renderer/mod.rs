//! Markup renderer
//!
//! Serializes a concrete node tree (one with no deferred nodes left) to a
//! markup string by depth-first traversal.

pub mod config;
pub mod escape;
pub mod markup;

pub use config::{MarkupConfig, SelfClosingStyle};
pub use markup::{serialize, serialize_with_config, write_to, MarkupBuilder};
