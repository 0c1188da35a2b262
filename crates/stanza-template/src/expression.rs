/*
 * expression.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Boolean expressions used by inline `if` conditions.
//!
//! Expressions are compiled once from tag tokens. Precedence, loosest first:
//! `or`, `and`, `not`, then the comparisons `==`, `!=`, `<`, `>`, `<=`, `>=`
//! and `in`. A lone operand is tested for truthiness.

use crate::context::Context;
use crate::error::{ParseError, RenderError};
use crate::resolvable::{Resolvable, Variable};
use crate::value::RenderValue;
use stanza_source_map::SourceInfo;
use std::fmt;

/// A condition evaluated against the current context.
pub trait BooleanExpression: fmt::Debug + Send + Sync {
    fn evaluate(&self, context: &Context) -> Result<bool, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    In,
}

impl Comparison {
    fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "==" => Comparison::Equal,
            "!=" => Comparison::NotEqual,
            "<" => Comparison::Less,
            ">" => Comparison::Greater,
            "<=" => Comparison::LessOrEqual,
            ">=" => Comparison::GreaterOrEqual,
            "in" => Comparison::In,
            _ => return None,
        })
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::Less => "<",
            Comparison::Greater => ">",
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterOrEqual => ">=",
            Comparison::In => "in",
        }
    }
}

/// The default expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Truthy(Variable),
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Compare {
        op: Comparison,
        lhs: Variable,
        rhs: Variable,
    },
}

impl Expression {
    /// Compile an expression from whitespace-separated tag tokens.
    pub fn compile(tokens: &[String], location: Option<&SourceInfo>) -> Result<Self, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::at("Expected an expression", location.cloned()));
        }

        let mut parser = ExpressionParser {
            tokens,
            pos: 0,
            location,
        };
        let expression = parser.parse_or()?;
        match parser.peek() {
            None => Ok(expression),
            Some(token) => Err(parser.error(format!("Unexpected '{}' in expression", token))),
        }
    }
}

fn is_keyword(token: &str) -> bool {
    matches!(token, "or" | "and" | "not") || Comparison::from_token(token).is_some()
}

struct ExpressionParser<'a> {
    tokens: &'a [String],
    pos: usize,
    location: Option<&'a SourceInfo>,
}

impl<'a> ExpressionParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn eat(&mut self, keyword: &str) -> bool {
        if self.peek() == Some(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: String) -> ParseError {
        ParseError::at(reason, self.location.cloned())
    }

    fn parse_or(&mut self) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.eat("or") {
            let rhs = self.parse_and()?;
            lhs = Expression::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_not()?;
        while self.eat("and") {
            let rhs = self.parse_not()?;
            lhs = Expression::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expression, ParseError> {
        if self.eat("not") {
            let inner = self.parse_not()?;
            return Ok(Expression::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        let lhs = self.parse_operand()?;
        let Some(op) = self.peek().and_then(Comparison::from_token) else {
            return Ok(Expression::Truthy(lhs));
        };
        self.pos += 1;
        let rhs = self.parse_operand()?;
        Ok(Expression::Compare { op, lhs, rhs })
    }

    fn parse_operand(&mut self) -> Result<Variable, ParseError> {
        match self.peek() {
            None => {
                let after = self.pos.checked_sub(1).map(|i| self.tokens[i].as_str());
                Err(self.error(format!(
                    "Expected an operand after '{}'",
                    after.unwrap_or_default()
                )))
            }
            Some(token) if is_keyword(token) => {
                Err(self.error(format!("Expected an operand, found '{}'", token)))
            }
            Some(token) => {
                let variable = Variable::compile(token, self.location)?;
                self.pos += 1;
                Ok(variable)
            }
        }
    }
}

impl BooleanExpression for Expression {
    fn evaluate(&self, context: &Context) -> Result<bool, RenderError> {
        match self {
            Expression::Truthy(variable) => Ok(variable
                .resolve(context)?
                .is_some_and(|value| value.is_truthy())),
            Expression::Not(inner) => Ok(!inner.evaluate(context)?),
            Expression::And(lhs, rhs) => Ok(lhs.evaluate(context)? && rhs.evaluate(context)?),
            Expression::Or(lhs, rhs) => Ok(lhs.evaluate(context)? || rhs.evaluate(context)?),
            Expression::Compare { op, lhs, rhs } => {
                let lhs = lhs.resolve(context)?.unwrap_or_default();
                let rhs = rhs.resolve(context)?.unwrap_or_default();
                compare(*op, &lhs, &rhs)
            }
        }
    }
}

fn compare(op: Comparison, lhs: &RenderValue, rhs: &RenderValue) -> Result<bool, RenderError> {
    match op {
        Comparison::Equal => Ok(lhs == rhs),
        Comparison::NotEqual => Ok(lhs != rhs),
        Comparison::In => Ok(contains(rhs, lhs)),
        ordering => {
            let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
                return Err(RenderError::new(format!(
                    "'{}' requires numeric operands",
                    ordering.symbol()
                )));
            };
            Ok(match ordering {
                Comparison::Less => a < b,
                Comparison::Greater => a > b,
                Comparison::LessOrEqual => a <= b,
                _ => a >= b,
            })
        }
    }
}

fn contains(haystack: &RenderValue, needle: &RenderValue) -> bool {
    match (haystack, needle) {
        (RenderValue::Seq(items), _) => items.contains(needle),
        (RenderValue::Str(s), RenderValue::Str(sub)) => s.contains(sub.as_str()),
        (RenderValue::Map(map), RenderValue::Str(key)) => map.contains_key(key),
        _ => false,
    }
}
