//! Source locations for stanza templates
//!
//! Template nodes and the errors they raise carry a [`SourceInfo`] pointing
//! back into the template text they were parsed from.
//!
//! # Example
//!
//! ```rust
//! use stanza_source_map::*;
//!
//! let source = "Hello\n{{ name }}";
//! let info = SourceInfo::from_offsets(FileId(0), source, 6, 16);
//!
//! assert_eq!(info.range.start.row, 1);
//! assert_eq!(info.range.start.column, 0);
//! ```

pub mod source_info;
pub mod types;
pub mod utils;

pub use source_info::SourceInfo;
pub use types::{FileId, Location, Range};
pub use utils::{offset_to_location, range_from_offsets};
