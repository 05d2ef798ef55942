//! # Block Parsing
//!
//! Line-oriented block parsing with pending block metadata.
//!
//! ## Parsing Phases
//!
//! 1. **Header** (`header`): An optional `= Title` line and attribute entries, ending at
//!    the first blank line after header content
//!
//! 2. **Body** (`parser`): A `BlockParser` dispatches on the line at its cursor.
//!    Attribute lines (`[...]`) and title lines (`.Title`) are collected as pending
//!    metadata and consumed by the next block
//!
//! ## Modules
//!
//! - **`kinds`**: Line recognizers with owned regexes (delimiters, headings, list markers,
//!   admonitions, block macros, attribute entries, block metadata)
//! - **`parser`**: `BlockParser` dispatch loop, sections, delimited blocks, paragraphs
//! - **`header`**: Document header and the section pre-scan used for preambles
//! - **`lists`**: Nested lists keyed by marker family and depth, `+` continuations
//! - **`tables`**: `|===` tables with column and cell specifiers
//!
//! ## Key Invariants
//!
//! - Verbatim blocks (listing, fenced, literal, passthrough) are raw zones: no block or
//!   inline parsing inside
//! - A section at level N owns everything up to the next heading of level N or less
//! - Delimiters only match whole lines; an unterminated block runs to the end of input
//! - Every anchor is registered with the child-index path of its node

pub mod header;
pub mod kinds;
pub mod lists;
pub mod parser;
pub mod tables;

pub use kinds::{BlockDelimiter, BlockMeta, Delimiter, ListFamily, ListMarker, SectionHeading};
pub use parser::BlockParser;
