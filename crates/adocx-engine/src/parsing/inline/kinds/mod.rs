//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters and patterns.
//!
//! ## Types
//!
//! - **`Mark`**: quoted-text formatting (`*strong*`, `_emphasis_`, `` `mono` ``,
//!   `^super^`, `~sub~`, `#highlight#`) in constrained and unconstrained forms
//! - **`InlineMacros`**: passthroughs, URLs, `link:`, `image:`, xrefs, anchors,
//!   footnotes and the generic `name:target[text]` macro
//!
//! The parser asks these types for patterns; it never hardcodes a delimiter.

pub mod macros;
pub mod marks;

pub use macros::InlineMacros;
pub use marks::{Mark, at_word_boundary};
