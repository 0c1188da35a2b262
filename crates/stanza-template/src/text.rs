/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Literal text nodes.

use crate::context::Context;
use crate::error::RenderError;
use crate::node::Node;
use crate::trim::TrimBehaviour;
use stanza_source_map::SourceInfo;

/// Literal text, optionally trimmed at either end when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    /// The literal text content.
    pub text: String,
    /// Trimming applied on render; the stored text is never modified.
    pub trim: TrimBehaviour,
    /// Source location of this literal.
    pub source_info: Option<SourceInfo>,
}

impl TextNode {
    /// Create an untrimmed text node.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            trim: TrimBehaviour::NOTHING,
            source_info: None,
        }
    }

    pub fn with_trim(mut self, trim: TrimBehaviour) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_source_info(mut self, source_info: SourceInfo) -> Self {
        self.source_info = Some(source_info);
        self
    }

    /// The text as it will be rendered.
    pub fn trimmed(&self) -> &str {
        self.trim.apply(&self.text)
    }
}

impl Node for TextNode {
    fn render(&self, _context: &Context) -> Result<String, RenderError> {
        Ok(self.trimmed().to_string())
    }

    fn source_info(&self) -> Option<&SourceInfo> {
        self.source_info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trim::Trim;

    fn render(node: &TextNode) -> String {
        node.render(&Context::new()).unwrap()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(render(&TextNode::new("  as is \n")), "  as is \n");
    }

    #[test]
    fn test_leading_whitespace() {
        let node =
            TextNode::new("  \thello").with_trim(TrimBehaviour::new(Trim::Whitespace, Trim::Nothing));
        assert_eq!(render(&node), "hello");
    }

    #[test]
    fn test_trailing_whitespace_and_new_lines() {
        let node = TextNode::new("hello  \n")
            .with_trim(TrimBehaviour::new(Trim::Nothing, Trim::WhitespaceAndNewLines));
        assert_eq!(render(&node), "hello");
    }

    #[test]
    fn test_both_ends() {
        let node =
            TextNode::new("  hello  ").with_trim(TrimBehaviour::new(Trim::Whitespace, Trim::Whitespace));
        assert_eq!(render(&node), "hello");
    }

    #[test]
    fn test_render_does_not_modify_text() {
        let node = TextNode::new(" x ").with_trim(TrimBehaviour::new(Trim::Whitespace, Trim::Whitespace));
        assert_eq!(render(&node), "x");
        assert_eq!(render(&node), "x");
        assert_eq!(node.text, " x ");
    }

    #[test]
    fn test_empty_text() {
        let node = TextNode::new("").with_trim(TrimBehaviour::SMART);
        assert_eq!(render(&node), "");
    }
}
