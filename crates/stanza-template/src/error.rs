/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template parsing and rendering.
//!
//! Both error kinds carry a human-readable reason and an optional source
//! location. Locations are attached once, by the innermost node that fails,
//! and are never replaced afterwards.

use stanza_source_map::SourceInfo;
use thiserror::Error;

fn describe_location(location: &Option<SourceInfo>) -> String {
    match location {
        Some(location) => format!(" (at {})", location),
        None => String::new(),
    }
}

/// Error raised while compiling tag contents into nodes or expressions.
///
/// Parse errors only happen during the one-time compile step, never while
/// rendering.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}{}", describe_location(.location))]
pub struct ParseError {
    reason: String,
    location: Option<SourceInfo>,
}

impl ParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: None,
        }
    }

    pub fn at(reason: impl Into<String>, location: Option<SourceInfo>) -> Self {
        Self {
            reason: reason.into(),
            location,
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn location(&self) -> Option<&SourceInfo> {
        self.location.as_ref()
    }
}

/// Error raised while rendering a node.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}{}", describe_location(.location))]
pub struct RenderError {
    reason: String,
    location: Option<SourceInfo>,
}

impl RenderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: None,
        }
    }

    pub fn at(reason: impl Into<String>, location: SourceInfo) -> Self {
        Self {
            reason: reason.into(),
            location: Some(location),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn location(&self) -> Option<&SourceInfo> {
        self.location.as_ref()
    }

    /// Attach `location` unless this error already carries one.
    ///
    /// The first location attached wins, so an error raised deep inside a
    /// nested render keeps pointing at the node that actually failed.
    pub fn with_location_if_missing(self, location: Option<SourceInfo>) -> Self {
        match self.location {
            Some(_) => self,
            None => Self {
                reason: self.reason,
                location,
            },
        }
    }
}

/// Errors from a compile-then-render flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
