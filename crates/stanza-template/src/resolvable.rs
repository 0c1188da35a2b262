/*
 * resolvable.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Values that can be resolved against a context.

use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::value::RenderValue;
use stanza_source_map::SourceInfo;
use std::fmt;

/// Something that produces a value from the current context.
///
/// Resolving never mutates the context. A missing value is `Ok(None)`, not an
/// error; errors are reserved for resolutions that genuinely cannot proceed.
pub trait Resolvable: fmt::Debug + Send + Sync {
    fn resolve(&self, context: &Context) -> Result<Option<RenderValue>, RenderError>;
}

/// A literal or a context path, compiled from a single raw expression.
///
/// - `"text"` or `'text'` is a string literal
/// - `42` and `-1.5` are numeric literals
/// - anything else is a dotted path looked up in the context
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Literal(RenderValue),
    Path(String),
}

impl Variable {
    pub fn compile(raw: &str, location: Option<&SourceInfo>) -> Result<Self, ParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::at("Expected a variable", location.cloned()));
        }

        if let Some(text) = quoted(raw) {
            return Ok(Variable::Literal(RenderValue::from(text)));
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Ok(Variable::Literal(RenderValue::Int(i)));
        }
        if looks_numeric(raw) {
            if let Ok(f) = raw.parse::<f64>() {
                return Ok(Variable::Literal(RenderValue::Float(f)));
            }
        }

        if raw.split('.').any(str::is_empty) {
            return Err(ParseError::at(
                format!("Invalid variable path '{}'", raw),
                location.cloned(),
            ));
        }
        Ok(Variable::Path(raw.to_string()))
    }
}

/// Only digits, signs and a decimal point; keeps `inf` and `NaN` as paths.
fn looks_numeric(raw: &str) -> bool {
    raw.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        && raw.chars().any(|c| c.is_ascii_digit())
}

fn quoted(raw: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        raw.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}

impl Resolvable for Variable {
    fn resolve(&self, context: &Context) -> Result<Option<RenderValue>, RenderError> {
        match self {
            Variable::Literal(value) => Ok(Some(value.clone())),
            Variable::Path(path) => Ok(context.lookup(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(raw: &str) -> Variable {
        Variable::compile(raw, None).expect("variable should compile")
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(compile("\"hi there\""), Variable::Literal("hi there".into()));
        assert_eq!(compile("'single'"), Variable::Literal("single".into()));
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(compile("42"), Variable::Literal(RenderValue::Int(42)));
        assert_eq!(compile("-1.5"), Variable::Literal(RenderValue::Float(-1.5)));
    }

    #[test]
    fn test_paths() {
        assert_eq!(compile("user.name"), Variable::Path("user.name".to_string()));
        assert_eq!(compile("inf"), Variable::Path("inf".to_string()));
    }

    #[test]
    fn test_invalid() {
        let error = Variable::compile("", None).unwrap_err();
        assert_eq!(error.reason(), "Expected a variable");

        let error = Variable::compile("a..b", None).unwrap_err();
        assert_eq!(error.reason(), "Invalid variable path 'a..b'");
    }

    #[test]
    fn test_resolve() {
        let ctx = Context::from_json(json!({"user": {"name": "Ada"}})).unwrap();

        assert_eq!(
            compile("user.name").resolve(&ctx).unwrap(),
            Some(RenderValue::from("Ada"))
        );
        assert_eq!(compile("user.age").resolve(&ctx).unwrap(), None);
        assert_eq!(
            compile("'lit'").resolve(&ctx).unwrap(),
            Some(RenderValue::from("lit"))
        );
    }
}
