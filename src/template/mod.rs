//! Templating: deferred nodes and the binding engine
//!
//! A template is an ordinary node tree containing [`Deferred`] placeholders.
//! [`bind`] resolves every placeholder against a [`Context`] and returns a new,
//! concrete tree ready for serialization. Resolution is recursive: whatever a
//! placeholder resolves to is bound in turn, so a lookup may return another
//! placeholder or a whole template fragment.
//!
//! # Example
//!
//! ```rust
//! use tagbind::{bind, serialize, Context, Element};
//! use tagbind::template::{from_context, loop_};
//!
//! let template = Element::new("ul").child(loop_(
//!     "x",
//!     "items",
//!     Element::new("li").child(from_context("x")),
//! ));
//!
//! let ctx = Context::new().with("items", vec![1, 2, 3]);
//! let html = serialize(&bind(&template.into(), &ctx).unwrap()).unwrap();
//! assert_eq!(html, "<ul><li>1</li><li>2</li><li>3</li></ul>");
//! ```

mod bind;
mod config;
mod deferred;
mod format;
mod helpers;

pub use config::BindConfig;
pub use deferred::{Cond, Deferred, Loop, LoopKeys, Predicate, Resolver, Source, ValueIter};
pub use format::interpolate;
pub use helpers::{
    cond, cond_else, defer, enumerate, format_context, from_context, from_context_or,
    from_nested_context, from_nested_context_or, loop_,
};

use tracing::debug;

use crate::context::Context;
use crate::error::BindError;
use crate::node::Node;

use bind::Binder;

/// Bind `template` against `ctx` with the default configuration
///
/// The template is not modified. Any error aborts the whole bind.
pub fn bind(template: &Node, ctx: &Context) -> Result<Node, BindError> {
    bind_with_config(template, ctx, &BindConfig::default())
}

/// Bind `template` against `ctx` with a custom configuration
pub fn bind_with_config(
    template: &Node,
    ctx: &Context,
    config: &BindConfig,
) -> Result<Node, BindError> {
    debug!(max_depth = ?config.max_depth, "binding template");
    Binder::new(config).node(template, ctx)
}
