/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The variable environment templates are rendered against.
//!
//! A [`Context`] is a stack of scopes. Lookups search from the innermost
//! scope outwards, and dotted paths walk into maps and sequences.

use crate::value::RenderValue;
use std::collections::BTreeMap;

type Scope = BTreeMap<String, RenderValue>;

/// Variable bindings for rendering, organised as nested scopes.
#[derive(Debug, Clone)]
pub struct Context {
    scopes: Vec<Scope>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }
}

impl Context {
    /// Create a new context with a single empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context whose root scope is the given JSON object.
    ///
    /// Returns `None` if `value` is not an object.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match RenderValue::from(value) {
            RenderValue::Map(root) => Some(Self { scopes: vec![root] }),
            _ => None,
        }
    }

    /// Bind a variable in the innermost scope.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RenderValue>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key.into(), value.into());
        }
    }

    /// Open a new innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Close the innermost scope. The root scope is never removed.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Run `f` with `bindings` in a fresh innermost scope.
    pub fn with_scope<T>(
        &mut self,
        bindings: impl IntoIterator<Item = (String, RenderValue)>,
        f: impl FnOnce(&Context) -> T,
    ) -> T {
        self.scopes.push(bindings.into_iter().collect());
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Number of open scopes, including the root.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Get a variable, checking enclosing scopes.
    pub fn get(&self, key: &str) -> Option<&RenderValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key))
    }

    /// Resolve a dotted path (e.g. `user.name`, `items.0`, `items.last`).
    ///
    /// Sequences accept numeric indices and `first`, `last` and `count`;
    /// strings accept `count`. Returns `None` when any step is missing.
    pub fn lookup(&self, path: &str) -> Option<RenderValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.get(first)?.clone();
        for segment in segments {
            current = member(&current, segment)?;
        }
        Some(current)
    }
}

fn member(value: &RenderValue, segment: &str) -> Option<RenderValue> {
    match value {
        RenderValue::Map(map) => map.get(segment).cloned(),
        RenderValue::Seq(items) => match segment {
            "first" => items.first().cloned(),
            "last" => items.last().cloned(),
            "count" => Some(RenderValue::Int(items.len() as i64)),
            index => index
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i).cloned()),
        },
        RenderValue::Str(s) if segment == "count" => {
            Some(RenderValue::Int(s.chars().count() as i64))
        }
        _ => None,
    }
}
