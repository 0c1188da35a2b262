/*
 * compiler.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Compiling raw tag text into resolvables and conditions.
//!
//! Node parsing goes through [`ExpressionCompiler`] so hosts can plug in
//! their own expression language. [`DefaultCompiler`] produces
//! [`Variable`]s and [`Expression`]s.

use crate::error::ParseError;
use crate::expression::{BooleanExpression, Expression};
use crate::resolvable::{Resolvable, Variable};
use stanza_source_map::SourceInfo;

/// Turns raw tag text into executable pieces.
pub trait ExpressionCompiler {
    /// Compile a single raw expression (e.g. `user.name`) into a resolvable.
    fn compile_resolvable(
        &self,
        raw: &str,
        location: Option<&SourceInfo>,
    ) -> Result<Box<dyn Resolvable>, ParseError>;

    /// Compile a token sequence (e.g. `["a", "and", "not", "b"]`) into a
    /// boolean condition.
    fn compile_expression(
        &self,
        tokens: &[String],
        location: Option<&SourceInfo>,
    ) -> Result<Box<dyn BooleanExpression>, ParseError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCompiler;

impl ExpressionCompiler for DefaultCompiler {
    fn compile_resolvable(
        &self,
        raw: &str,
        location: Option<&SourceInfo>,
    ) -> Result<Box<dyn Resolvable>, ParseError> {
        Ok(Box::new(Variable::compile(raw, location)?))
    }

    fn compile_expression(
        &self,
        tokens: &[String],
        location: Option<&SourceInfo>,
    ) -> Result<Box<dyn BooleanExpression>, ParseError> {
        Ok(Box::new(Expression::compile(tokens, location)?))
    }
}

/// Split tag contents on whitespace, keeping quoted strings in one piece.
///
/// Quotes are kept in the output so literals still read as literals:
/// `name if title == "Dr Who"` splits into
/// `["name", "if", "title", "==", "\"Dr Who\""]`.
pub fn split_components(contents: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in contents.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    components.push(std::mem::take(&mut current));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        components.push(current);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::value::RenderValue;

    #[test]
    fn test_split_plain() {
        assert_eq!(
            split_components("  name   if  cond "),
            vec!["name", "if", "cond"]
        );
        assert!(split_components("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_quoted_strings() {
        assert_eq!(
            split_components(r#"name if title == "Dr Who" else 'no one'"#),
            vec!["name", "if", "title", "==", "\"Dr Who\"", "else", "'no one'"]
        );
    }

    #[test]
    fn test_split_unterminated_quote_runs_to_end() {
        assert_eq!(split_components("a 'b c"), vec!["a", "'b c"]);
    }

    #[test]
    fn test_default_compiler() {
        let mut ctx = Context::new();
        ctx.insert("flag", true);

        let resolvable = DefaultCompiler.compile_resolvable("flag", None).unwrap();
        assert_eq!(
            resolvable.resolve(&ctx).unwrap(),
            Some(RenderValue::Bool(true))
        );

        let condition = DefaultCompiler
            .compile_expression(&["not".to_string(), "flag".to_string()], None)
            .unwrap();
        assert!(!condition.evaluate(&ctx).unwrap());
    }
}
