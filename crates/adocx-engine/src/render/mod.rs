//! # Rendering
//!
//! Serializers from the document tree to output markup. Both renderers match
//! exhaustively on `NodeKind`, so a new node kind fails to compile until it is handled.
//!
//! ## Modules
//!
//! - **`html`**: HTML5 (or XHTML-compatible) fragments and standalone pages
//! - **`xml`**: Generic XML with a fixed element vocabulary and sanitized attribute names

pub mod html;
pub mod xml;

pub use html::{DocumentMeta, HtmlOptions, Stylesheet, render_html, render_html_document};
pub use xml::render_xml;
