/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Dynamic values produced by resolution, and their text conversion.
//!
//! [`RenderValue`] is a closed set of shapes. Sequences nest structurally, so
//! stringifying a value never needs to guess at an element's type.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value that knows how to describe itself as text.
///
/// Host types implement this to control how they appear in rendered output.
pub trait Describe: fmt::Debug + Send + Sync {
    fn describe(&self) -> String;
}

/// A host value with no textual description of its own.
///
/// Renders with a generic `<type name>` description.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// The fallback description used when rendering.
    pub fn description(&self) -> String {
        format!("<{}>", self.type_name)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.type_name).finish()
    }
}

/// A value produced by resolving a variable against a context.
#[derive(Debug, Clone, Default)]
pub enum RenderValue {
    /// A null/missing value.
    #[default]
    Null,

    Bool(bool),

    Int(i64),

    Float(f64),

    /// A string value.
    Str(String),

    /// A sequence of values. `Null` elements are kept as placeholders.
    Seq(Vec<RenderValue>),

    /// A map of string keys to values.
    Map(BTreeMap<String, RenderValue>),

    /// A host value that describes itself.
    Describable(Arc<dyn Describe>),

    /// A host value with only a generic description.
    Opaque(OpaqueValue),
}

impl RenderValue {
    pub fn describable(value: impl Describe + 'static) -> Self {
        RenderValue::Describable(Arc::new(value))
    }

    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        RenderValue::Opaque(OpaqueValue::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RenderValue::Null)
    }

    /// Check if this value is "truthy" when used as a bare condition.
    ///
    /// - Null, `false`, zero, and empty strings, sequences or maps are falsy
    /// - Everything else, including host values, is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            RenderValue::Null => false,
            RenderValue::Bool(b) => *b,
            RenderValue::Int(i) => *i != 0,
            RenderValue::Float(f) => *f != 0.0,
            RenderValue::Str(s) => !s.is_empty(),
            RenderValue::Seq(items) => !items.is_empty(),
            RenderValue::Map(m) => !m.is_empty(),
            RenderValue::Describable(_) | RenderValue::Opaque(_) => true,
        }
    }

    /// Numeric view of this value, for ordering comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RenderValue::Int(i) => Some(*i as f64),
            RenderValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Debug-style description, as used for sequence elements.
    ///
    /// Strings are quoted, null is `nil`, and nested sequences and maps are
    /// bracketed.
    fn debug_description(&self) -> String {
        match self {
            RenderValue::Null => "nil".to_string(),
            RenderValue::Str(s) => format!("{:?}", s),
            RenderValue::Seq(items) => describe_seq(items),
            RenderValue::Map(map) => describe_map(map),
            other => stringify(Some(other)),
        }
    }
}

impl PartialEq for RenderValue {
    fn eq(&self, other: &Self) -> bool {
        use RenderValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64) == *b,
            (Str(a), Str(b)) => a == b,
            (Seq(a), Seq(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Describable(a), Describable(b)) => a.describe() == b.describe(),
            (Opaque(a), Opaque(b)) => Arc::ptr_eq(&a.inner, &b.inner),
            _ => false,
        }
    }
}

/// Convert an optional resolved value to output text.
///
/// Total: every input has a textual rendering.
///
/// - Missing and null values render as the empty string
/// - Strings render unchanged
/// - Sequences render as a bracketed, comma-separated description of their
///   elements, e.g. `[1, nil, ["a", "b"]]`
/// - Maps render as `["key": value]`, or `[:]` when empty
/// - Host values render their own description, or `<type name>`
pub fn stringify(value: Option<&RenderValue>) -> String {
    match value {
        None | Some(RenderValue::Null) => String::new(),
        Some(RenderValue::Str(s)) => s.clone(),
        Some(RenderValue::Seq(items)) => describe_seq(items),
        Some(RenderValue::Map(map)) => describe_map(map),
        Some(RenderValue::Bool(b)) => b.to_string(),
        Some(RenderValue::Int(i)) => i.to_string(),
        // Debug keeps the fractional part: 1.0 renders as "1.0", not "1"
        Some(RenderValue::Float(f)) => format!("{:?}", f),
        Some(RenderValue::Describable(value)) => value.describe(),
        Some(RenderValue::Opaque(value)) => value.description(),
    }
}

fn describe_seq(items: &[RenderValue]) -> String {
    let parts: Vec<String> = items.iter().map(|v| v.debug_description()).collect();
    format!("[{}]", parts.join(", "))
}

fn describe_map(map: &BTreeMap<String, RenderValue>) -> String {
    if map.is_empty() {
        return "[:]".to_string();
    }
    let parts: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{:?}: {}", k, v.debug_description()))
        .collect();
    format!("[{}]", parts.join(", "))
}

impl From<&str> for RenderValue {
    fn from(s: &str) -> Self {
        RenderValue::Str(s.to_string())
    }
}

impl From<String> for RenderValue {
    fn from(s: String) -> Self {
        RenderValue::Str(s)
    }
}

impl From<bool> for RenderValue {
    fn from(b: bool) -> Self {
        RenderValue::Bool(b)
    }
}

impl From<i64> for RenderValue {
    fn from(i: i64) -> Self {
        RenderValue::Int(i)
    }
}

impl From<f64> for RenderValue {
    fn from(f: f64) -> Self {
        RenderValue::Float(f)
    }
}

impl<T: Into<RenderValue>> From<Option<T>> for RenderValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RenderValue::Null, Into::into)
    }
}

impl<T: Into<RenderValue>> From<Vec<T>> for RenderValue {
    fn from(items: Vec<T>) -> Self {
        RenderValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for RenderValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RenderValue::Null,
            serde_json::Value::Bool(b) => RenderValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => RenderValue::Int(i),
                None => n.as_f64().map_or(RenderValue::Null, RenderValue::Float),
            },
            serde_json::Value::String(s) => RenderValue::Str(s),
            serde_json::Value::Array(items) => {
                RenderValue::Seq(items.into_iter().map(RenderValue::from).collect())
            }
            serde_json::Value::Object(map) => RenderValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, RenderValue::from(v)))
                    .collect(),
            ),
        }
    }
}
