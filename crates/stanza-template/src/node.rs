/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The node abstraction.
//!
//! Every renderable piece of a parsed template implements [`Node`]. Custom
//! tags either implement the trait directly or wrap a closure in a
//! [`SimpleNode`].

use crate::context::Context;
use crate::error::RenderError;
use stanza_source_map::SourceInfo;
use std::fmt;

/// A renderable unit of a parsed template.
///
/// Rendering depends only on the node and the context; nodes are immutable
/// once built and may be shared between concurrent renders.
pub trait Node: fmt::Debug + Send + Sync {
    /// Produce this node's output for `context`.
    fn render(&self, context: &Context) -> Result<String, RenderError>;

    /// Where this node came from, or `None` for synthetic nodes.
    fn source_info(&self) -> Option<&SourceInfo>;
}

/// An ordered list of nodes, rendered front to back.
pub type NodeList = Vec<Box<dyn Node>>;

type RenderFn = dyn Fn(&Context) -> Result<String, RenderError> + Send + Sync;

/// A node whose output comes from a stored function.
pub struct SimpleNode {
    source_info: Option<SourceInfo>,
    handler: Box<RenderFn>,
}

impl SimpleNode {
    pub fn new(
        source_info: Option<SourceInfo>,
        handler: impl Fn(&Context) -> Result<String, RenderError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            source_info,
            handler: Box::new(handler),
        }
    }
}

impl fmt::Debug for SimpleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleNode")
            .field("source_info", &self.source_info)
            .finish_non_exhaustive()
    }
}

impl Node for SimpleNode {
    fn render(&self, context: &Context) -> Result<String, RenderError> {
        (self.handler)(context)
    }

    fn source_info(&self) -> Option<&SourceInfo> {
        self.source_info.as_ref()
    }
}
