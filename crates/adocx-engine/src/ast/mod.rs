//! # Document Tree
//!
//! The tagged node model shared by the block parser, the inline parser and both
//! renderers.
//!
//! ## Modules
//!
//! - **`kind`**: `NodeKind` enum; payload-carrying variants hold text content or macro names
//! - **`node`**: `Node` struct (kind, ordered attributes, owned children) plus tree helpers
//!
//! ## Key Invariants
//!
//! - A node exclusively owns its children; there are no parent pointers
//! - Attribute maps are ordered (`BTreeMap`) so rendered attribute order is stable
//! - Once `parse` returns the tree is never mutated by renderers

pub mod kind;
pub mod node;

pub use kind::NodeKind;
pub use node::{DEFAULT_DOCTYPE, Node};
