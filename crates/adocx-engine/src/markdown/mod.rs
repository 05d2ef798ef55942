//! # Markdown to AsciiDoc
//!
//! Line-oriented transcoder from CommonMark/GFM to AsciiDoc. It does not build a tree;
//! the output is AsciiDoc text that the regular parser can then read.
//!
//! ## Passes
//!
//! 1. **References** (`references`): Collect `[label]: url "title"` definitions from the
//!    whole input
//! 2. **Rewrite** (`rewrite`): Walk the lines once with a small block state (fences,
//!    indented code, HTML blocks, frontmatter, quotes, tables) and write AsciiDoc lines
//!    as soon as they are known
//!
//! ## Modules
//!
//! - **`inline`**: Emphasis, links, images and inline HTML within one line
//! - **`frontmatter`**: YAML frontmatter to document title and attribute entries
//! - **`table`**: GFM table rows, separator alignments and `cols` specs

pub mod frontmatter;
pub mod inline;
pub mod references;
pub mod rewrite;
pub mod table;

use std::io::{Read, Write};

use crate::error::TranscodeError;

pub use references::{LinkReference, References};
pub use rewrite::Transcoder;

/// Converts Markdown text to AsciiDoc text.
pub fn convert_markdown_to_asciidoc(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let references = References::collect(lines.iter().copied());
    match Transcoder::new(&references, Vec::new()).run(&lines) {
        Ok(out) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => {
            log::warn!("in-memory transcode failed: {err}");
            String::new()
        }
    }
}

/// Reads all of `reader`, then writes the AsciiDoc conversion to `writer` line by line.
pub fn convert_markdown_streaming(
    mut reader: impl Read,
    writer: impl Write,
) -> Result<(), TranscodeError> {
    let mut markdown = String::new();
    reader
        .read_to_string(&mut markdown)
        .map_err(TranscodeError::Read)?;
    let lines: Vec<&str> = markdown.lines().collect();
    let references = References::collect(lines.iter().copied());
    Transcoder::new(&references, writer)
        .run(&lines)
        .map_err(TranscodeError::Write)?;
    Ok(())
}
