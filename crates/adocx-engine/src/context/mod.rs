//! # Parse Context
//!
//! Scoped mutable state threaded through recursive parsing.
//!
//! ## Modules
//!
//! - **`attributes`**: `AttributeTable` with `{name}` substitution and merge
//! - **`anchors`**: `AnchorRegistry` mapping ids to node paths
//!
//! Each block parser owns a copy of the attribute table. Assignments are applied to
//! that copy and to the document-wide sink held here, so a nested block sees the
//! values in force where it opened while the document receives every write.

pub mod anchors;
pub mod attributes;

pub use anchors::{Anchor, AnchorRegistry};
pub use attributes::{AttributeTable, substitute};

use std::collections::HashMap;

/// State shared by every parser instance working on one document.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Every attribute assignment seen anywhere in the document, last write wins.
    pub document_attributes: AttributeTable,
    pub anchors: AnchorRegistry,
    footnotes: usize,
    footnote_ids: HashMap<String, usize>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for a new footnote. A named footnote keeps the number of its first use.
    pub fn footnote_index(&mut self, id: Option<&str>) -> usize {
        if let Some(index) = id.and_then(|id| self.footnote_ids.get(id)) {
            return *index;
        }
        self.footnotes += 1;
        if let Some(id) = id {
            self.footnote_ids.insert(id.to_string(), self.footnotes);
        }
        self.footnotes
    }

    /// Number of a previously declared named footnote.
    pub fn footnote_ref(&self, id: &str) -> Option<usize> {
        self.footnote_ids.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footnotes_count_from_one() {
        let mut ctx = ParseContext::new();
        assert_eq!(ctx.footnote_index(None), 1);
        assert_eq!(ctx.footnote_index(Some("disclaimer")), 2);
        assert_eq!(ctx.footnote_index(None), 3);
    }

    #[test]
    fn named_footnotes_reuse_their_number() {
        let mut ctx = ParseContext::new();
        ctx.footnote_index(Some("a"));
        assert_eq!(ctx.footnote_index(Some("a")), 1);
        assert_eq!(ctx.footnote_ref("a"), Some(1));
        assert_eq!(ctx.footnote_ref("b"), None);
    }
}
