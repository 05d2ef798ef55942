//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a parsed tree to a stable indented text outline for
//!   `insta` snapshot testing
//! - **`invariants`**: Runtime checks for parser correctness (section nesting, leaf-only
//!   text nodes, inline nodes never containing blocks, anchors resolving to nodes)
//!
//! ## Testing Strategy
//!
//! Parsing behavior is pinned by snapshot tests over small documents rather than by a
//! separate formal grammar. Outlines show node kinds, attributes and text content.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use invariants::check_anchors;
pub use normalize::outline;
