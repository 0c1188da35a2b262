//! Source information attached to template nodes and errors

use crate::types::{FileId, Range};
use crate::utils::{offset_to_location, range_from_offsets};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a piece of template text came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceInfo {
    /// The template source this span belongs to
    pub file_id: FileId,
    /// The span within that source
    pub range: Range,
}

impl SourceInfo {
    /// Create source info for a span in a template source
    pub fn original(file_id: FileId, range: Range) -> Self {
        SourceInfo { file_id, range }
    }

    /// Create source info from byte offsets, computing rows and columns
    /// against `source`.
    ///
    /// Offsets past the end of `source` fall back to offset-only positions.
    pub fn from_offsets(file_id: FileId, source: &str, start: usize, end: usize) -> Self {
        let range = match (
            offset_to_location(source, start),
            offset_to_location(source, end),
        ) {
            (Some(start), Some(end)) => Range { start, end },
            _ => range_from_offsets(start, end),
        };
        SourceInfo { file_id, range }
    }

    pub fn start_offset(&self) -> usize {
        self.range.start.offset
    }

    pub fn end_offset(&self) -> usize {
        self.range.end.offset
    }
}

/// Renders as `row:column`, both 1-based.
impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.range.start.row + 1,
            self.range.start.column + 1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offsets_computes_rows() {
        let source = "line one\n  {{ x }}";
        let info = SourceInfo::from_offsets(FileId(3), source, 11, 18);

        assert_eq!(info.file_id, FileId(3));
        assert_eq!(info.range.start.row, 1);
        assert_eq!(info.range.start.column, 2);
        assert_eq!(info.start_offset(), 11);
        assert_eq!(info.end_offset(), 18);
    }

    #[test]
    fn test_from_offsets_out_of_bounds() {
        let info = SourceInfo::from_offsets(FileId(0), "abc", 1, 40);
        assert_eq!(info.start_offset(), 1);
        assert_eq!(info.end_offset(), 40);
        assert_eq!(info.range.start.row, 0);
    }

    #[test]
    fn test_display_is_one_based() {
        let info = SourceInfo::from_offsets(FileId(0), "a\nbc", 3, 4);
        assert_eq!(info.to_string(), "2:2");
    }

    #[test]
    fn test_serde_roundtrip() {
        let info = SourceInfo::from_offsets(FileId(1), "hello", 1, 3);
        let json = serde_json::to_string(&info).unwrap();
        let back: SourceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
