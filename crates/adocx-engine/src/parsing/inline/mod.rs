//! # Inline Parsing
//!
//! Pattern-pooling inline parser for the text of paragraphs, list items, table cells
//! and admonitions.
//!
//! ## Architecture
//!
//! Each formatting family (marks, passthroughs, URLs, macros, cross references,
//! anchors, footnotes) is matched independently over the whole span. All candidates
//! are pooled and stable-sorted by start offset, then accepted left to right; a
//! candidate that overlaps an accepted one is dropped.
//!
//! ## Modules
//!
//! - **`kinds`**: `Mark` and `InlineMacros`, the owners of every inline delimiter and pattern
//! - **`parser`**: `parse_inline()` main entry point
//!
//! ## Overlap Resolution
//!
//! The first claim on a region wins, by start offset and then by family scan order.
//! This is not longest-match: in `_b *c_ d*` the emphasis span starts first and the
//! strong span that would overlap it is discarded.

pub mod kinds;
pub mod parser;

pub use parser::parse_inline;
