/*
 * variable.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable nodes: `{{ value }}` and the inline `{{ value if cond else other }}`.

use crate::compiler::{ExpressionCompiler, split_components};
use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::expression::BooleanExpression;
use crate::node::Node;
use crate::resolvable::Resolvable;
use crate::value::stringify;
use stanza_source_map::SourceInfo;

/// The `if cond [else other]` part of a variable tag.
///
/// A fallback can only exist alongside a condition.
#[derive(Debug)]
pub struct InlineCondition {
    pub condition: Box<dyn BooleanExpression>,
    /// Rendered when the condition is false; empty output if absent.
    pub otherwise: Option<Box<dyn Resolvable>>,
}

/// Outputs a resolved value, optionally guarded by an inline condition.
#[derive(Debug)]
pub struct VariableNode {
    pub value: Box<dyn Resolvable>,
    pub inline_condition: Option<InlineCondition>,
    pub source_info: Option<SourceInfo>,
}

impl VariableNode {
    pub fn new(value: Box<dyn Resolvable>, source_info: Option<SourceInfo>) -> Self {
        Self {
            value,
            inline_condition: None,
            source_info,
        }
    }

    pub fn with_condition(
        mut self,
        condition: Box<dyn BooleanExpression>,
        otherwise: Option<Box<dyn Resolvable>>,
    ) -> Self {
        self.inline_condition = Some(InlineCondition {
            condition,
            otherwise,
        });
        self
    }

    /// Parse a variable tag from its split components.
    ///
    /// Recognised forms:
    ///
    /// - `value`
    /// - `value if condition...`
    /// - `value if condition... else fallback...`
    ///
    /// Only the first component becomes the value expression. Any other
    /// trailing components of a tag without `if` are ignored.
    pub fn parse(
        components: &[String],
        source_info: Option<SourceInfo>,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<Self, ParseError> {
        let Some(first) = components.first() else {
            return Err(ParseError::at("Missing variable name", source_info));
        };
        let location = source_info.as_ref();

        let mut inline_condition = None;
        if components.get(1).map(String::as_str) == Some("if") {
            let tail = &components[2..];
            inline_condition = Some(match tail.iter().position(|c| c == "else") {
                Some(k) => {
                    tracing::trace!(value = %first, "Parsed variable with inline if/else");
                    InlineCondition {
                        condition: compiler.compile_expression(&tail[..k], location)?,
                        otherwise: Some(
                            compiler.compile_resolvable(&tail[k + 1..].join(" "), location)?,
                        ),
                    }
                }
                None => {
                    tracing::trace!(value = %first, "Parsed variable with inline if");
                    InlineCondition {
                        condition: compiler.compile_expression(tail, location)?,
                        otherwise: None,
                    }
                }
            });
        } else if components.len() > 1 {
            tracing::trace!(
                value = %first,
                ignored = components.len() - 1,
                "Ignoring trailing components of variable tag"
            );
        }

        let value = compiler.compile_resolvable(first, location)?;
        Ok(Self {
            value,
            inline_condition,
            source_info,
        })
    }

    /// Parse a variable tag from its raw contents, e.g. `name if show`.
    pub fn parse_tag(
        contents: &str,
        source_info: Option<SourceInfo>,
        compiler: &dyn ExpressionCompiler,
    ) -> Result<Self, ParseError> {
        Self::parse(&split_components(contents), source_info, compiler)
    }

    pub fn condition(&self) -> Option<&dyn BooleanExpression> {
        self.inline_condition
            .as_ref()
            .map(|inline| &*inline.condition)
    }

    pub fn else_expression(&self) -> Option<&dyn Resolvable> {
        self.inline_condition
            .as_ref()
            .and_then(|inline| inline.otherwise.as_deref())
    }
}

impl Node for VariableNode {
    fn render(&self, context: &Context) -> Result<String, RenderError> {
        if let Some(inline) = &self.inline_condition {
            if !inline.condition.evaluate(context)? {
                return match &inline.otherwise {
                    Some(otherwise) => Ok(stringify(otherwise.resolve(context)?.as_ref())),
                    None => Ok(String::new()),
                };
            }
        }

        let value = self.value.resolve(context)?;
        Ok(stringify(value.as_ref()))
    }

    fn source_info(&self) -> Option<&SourceInfo> {
        self.source_info.as_ref()
    }
}
