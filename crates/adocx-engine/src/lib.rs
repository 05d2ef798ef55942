//! # adocx engine
//!
//! AsciiDoc to document tree to HTML/XML, plus a Markdown to AsciiDoc transcoder.
//!
//! ## Pipeline
//!
//! 1. **Parse** (`parsing`): Lines become a `Node` tree. Attribute entries and anchors are
//!    tracked in a `ParseContext` while the tree is built
//! 2. **Render** (`render`): The finished tree is serialized to HTML or XML. Renderers
//!    never mutate the tree
//!
//! The transcoder (`markdown`) is independent of both and produces AsciiDoc text.
//!
//! ## Error Model
//!
//! Malformed markup never fails a parse; it degrades to paragraphs and plain text. Only
//! I/O on the reader and writer entry points can fail.

pub mod ast;
pub mod context;
pub mod error;
pub mod markdown;
pub mod parsing;
pub mod render;

use std::io::Read;

pub use ast::{Node, NodeKind};
pub use context::{AnchorRegistry, AttributeTable};
pub use error::{ParseError, TranscodeError};
pub use markdown::{convert_markdown_streaming, convert_markdown_to_asciidoc};
pub use parsing::{ParsedDoc, Parser};
pub use render::{DocumentMeta, HtmlOptions, Stylesheet, render_html_document};

/// Parses AsciiDoc text into a document tree.
pub fn parse(text: &str) -> Node {
    parsing::parse_document(text)
}

/// Reads all of `reader` and parses it.
pub fn parse_reader(mut reader: impl Read) -> Result<Node, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse(&text))
}

pub fn to_xml(root: &Node) -> String {
    render::render_xml(root)
}

pub fn to_html(root: &Node, options: &HtmlOptions) -> String {
    render::render_html(root, options)
}
