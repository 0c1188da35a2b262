/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering core for stanza templates.
//!
//! This crate turns an assembled tree of template nodes plus a variable
//! [`Context`] into output text. It provides:
//!
//! - The [`Node`] trait, with [`TextNode`], [`VariableNode`] and the
//!   closure-backed [`SimpleNode`]
//! - The render pipeline, [`render_nodes`], which fails fast and reports the
//!   innermost failing node's location
//! - [`RenderValue`], the dynamic value type, and [`stringify`]
//! - Literal trimming via [`TrimBehaviour`]
//! - Inline conditions: `{{ name if show else "anonymous" }}`
//!
//! # Architecture
//!
//! Tokenizing template source is **not** part of this crate. Whatever
//! assembles nodes from source hands over split tag components and
//! [`SourceInfo`](stanza_source_map::SourceInfo) locations; expressions inside
//! tags are compiled through the [`ExpressionCompiler`] trait, with
//! [`DefaultCompiler`] as the built-in implementation.
//!
//! # Example
//!
//! ```
//! use stanza_template::*;
//!
//! let nodes: NodeList = vec![
//!     Box::new(TextNode::new("Hello, ")),
//!     Box::new(VariableNode::parse_tag("name if name else 'stranger'", None, &DefaultCompiler)?),
//!     Box::new(TextNode::new("!")),
//! ];
//!
//! let mut ctx = Context::new();
//! ctx.insert("name", "World");
//! assert_eq!(render_nodes(&nodes, &ctx)?, "Hello, World!");
//!
//! assert_eq!(render_nodes(&nodes, &Context::new())?, "Hello, stranger!");
//! # Ok::<(), TemplateError>(())
//! ```

pub mod compiler;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod node;
pub mod resolvable;
pub mod text;
pub mod trim;
pub mod value;
pub mod variable;

// Re-export main types at crate root
pub use compiler::{DefaultCompiler, ExpressionCompiler, split_components};
pub use context::Context;
pub use error::{ParseError, RenderError, TemplateError, TemplateResult};
pub use evaluator::{Template, render_nodes};
pub use expression::{BooleanExpression, Comparison, Expression};
pub use node::{Node, NodeList, SimpleNode};
pub use resolvable::{Resolvable, Variable};
pub use text::TextNode;
pub use trim::{Trim, TrimBehaviour};
pub use value::{Describe, OpaqueValue, RenderValue, stringify};
pub use variable::{InlineCondition, VariableNode};
