//! Helpers for turning byte offsets into positions

use crate::types::{Location, Range};

/// Convert a byte offset to a Location with line and column info
///
/// Returns None if the offset is out of bounds.
pub fn offset_to_location(source: &str, offset: usize) -> Option<Location> {
    if offset > source.len() {
        return None;
    }

    let mut row = 0;
    let mut column = 0;

    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            row += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    Some(Location {
        offset,
        row,
        column,
    })
}

/// Create a Range from start and end byte offsets
///
/// Only the offsets are filled in; row and column are 0.
/// Use `offset_to_location` to get full Location info.
pub fn range_from_offsets(start: usize, end: usize) -> Range {
    Range {
        start: Location {
            offset: start,
            ..Location::default()
        },
        end: Location {
            offset: end,
            ..Location::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_location_first_line() {
        let loc = offset_to_location("hello world", 6).unwrap();
        assert_eq!((loc.row, loc.column), (0, 6));
    }

    #[test]
    fn test_offset_to_location_after_newline() {
        let loc = offset_to_location("ab\ncd\nef", 7).unwrap();
        assert_eq!((loc.row, loc.column), (2, 1));
    }

    #[test]
    fn test_offset_to_location_counts_chars_not_bytes() {
        // 'é' is two bytes
        let loc = offset_to_location("é!x", 3).unwrap();
        assert_eq!(loc.column, 2);
    }

    #[test]
    fn test_offset_to_location_out_of_bounds() {
        assert!(offset_to_location("abc", 4).is_none());
        assert!(offset_to_location("abc", 3).is_some());
    }

    #[test]
    fn test_range_from_offsets() {
        let range = range_from_offsets(2, 9);
        assert_eq!(range.start.offset, 2);
        assert_eq!(range.end.offset, 9);
        assert_eq!(range.start.row, 0);
    }
}
