/*
 * trim.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Whitespace trimming for literal text.
//!
//! Each end of a text node can strip one [`Trim`] class. Classes match a
//! maximal run of characters from that end; nothing else is pattern matched.

use serde::{Deserialize, Serialize};

/// A set of characters stripped from one end of literal text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trim {
    /// No stripping.
    #[default]
    #[serde(alias = "none")]
    Nothing,

    /// Spaces and tabs.
    Whitespace,

    /// Any whitespace, newlines included.
    WhitespaceAndNewLines,

    /// Spaces and tabs up to and including a single newline.
    ///
    /// Only applies when the newline is present; otherwise nothing is
    /// stripped.
    WhitespaceAndOneNewLine,
}

/// Which [`Trim`] class applies to each end of a text node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimBehaviour {
    pub leading: Trim,
    pub trailing: Trim,
}

impl TrimBehaviour {
    pub const NOTHING: TrimBehaviour = TrimBehaviour {
        leading: Trim::Nothing,
        trailing: Trim::Nothing,
    };

    /// Strip the line a block tag sits on, leaving surrounding lines intact.
    pub const SMART: TrimBehaviour = TrimBehaviour {
        leading: Trim::WhitespaceAndOneNewLine,
        trailing: Trim::WhitespaceAndOneNewLine,
    };

    pub fn new(leading: Trim, trailing: Trim) -> Self {
        Self { leading, trailing }
    }

    /// Apply both ends of this behaviour to `text`.
    pub fn apply<'a>(&self, text: &'a str) -> &'a str {
        trim_end(trim_start(text, self.leading), self.trailing)
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Strip the leading run of `class` characters from `text`.
pub fn trim_start(text: &str, class: Trim) -> &str {
    match class {
        Trim::Nothing => text,
        Trim::Whitespace => text.trim_start_matches(is_blank),
        Trim::WhitespaceAndNewLines => text.trim_start(),
        Trim::WhitespaceAndOneNewLine => {
            let rest = text.trim_start_matches(is_blank);
            rest.strip_prefix('\n').unwrap_or(text)
        }
    }
}

/// Strip the trailing run of `class` characters from `text`.
pub fn trim_end(text: &str, class: Trim) -> &str {
    match class {
        Trim::Nothing => text,
        Trim::Whitespace => text.trim_end_matches(is_blank),
        Trim::WhitespaceAndNewLines => text.trim_end(),
        Trim::WhitespaceAndOneNewLine => {
            let rest = text.trim_end_matches(is_blank);
            rest.strip_suffix('\n').unwrap_or(text)
        }
    }
}
