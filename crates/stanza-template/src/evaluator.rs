/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The render pipeline.
//!
//! Nodes render strictly in order and their output is concatenated. The
//! first failure aborts the render; the failing node's location is attached
//! unless a nested render already attached a more specific one.

use crate::context::Context;
use crate::error::{RenderError, TemplateResult};
use crate::node::{Node, NodeList};

/// An assembled template ready for rendering.
#[derive(Debug, Default)]
pub struct Template {
    nodes: NodeList,
}

impl Template {
    pub fn new(nodes: NodeList) -> Self {
        Self { nodes }
    }

    /// Get the nodes of this template.
    pub fn nodes(&self) -> &[Box<dyn Node>] {
        &self.nodes
    }

    /// Render this template with the given context.
    ///
    /// # Returns
    /// The rendered output string, or the first error raised by a node.
    pub fn render(&self, context: &Context) -> TemplateResult<String> {
        Ok(render_nodes(&self.nodes, context)?)
    }
}

impl From<NodeList> for Template {
    fn from(nodes: NodeList) -> Self {
        Self::new(nodes)
    }
}

/// Render a list of nodes, concatenating their output.
///
/// On failure no partial output is returned.
pub fn render_nodes(nodes: &[Box<dyn Node>], context: &Context) -> Result<String, RenderError> {
    let mut output = String::new();
    for (index, node) in nodes.iter().enumerate() {
        match node.render(context) {
            Ok(text) => {
                tracing::trace!(index, bytes = text.len(), "Rendered node");
                output.push_str(&text);
            }
            Err(error) => {
                tracing::debug!(
                    index,
                    reason = error.reason(),
                    located = error.location().is_some(),
                    "Node failed to render"
                );
                return Err(error.with_location_if_missing(node.source_info().cloned()));
            }
        }
    }
    Ok(output)
}
