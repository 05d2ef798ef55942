pub mod attrlist;
pub mod blocks;
pub mod inline;
pub mod snapshot;

use crate::ast::{DEFAULT_DOCTYPE, Node, NodeKind};
use crate::context::{AnchorRegistry, AttributeTable, ParseContext};

use blocks::BlockParser;

/// A parsed document together with the anchors declared in it.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    pub root: Node,
    pub anchors: AnchorRegistry,
}

/// AsciiDoc parser. Holds the attributes seeded before the header is read.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    attributes: AttributeTable,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser whose documents start with `attributes` already set.
    pub fn with_attributes(attributes: AttributeTable) -> Self {
        Self { attributes }
    }

    pub fn parse(&self, text: &str) -> Node {
        self.parse_with_anchors(text).root
    }

    pub fn parse_with_anchors(&self, text: &str) -> ParsedDoc {
        let lines = split_lines(text);
        let mut ctx = ParseContext::new();
        for (name, value) in self.attributes.iter() {
            ctx.document_attributes.set(name, value);
        }

        let mut root = Node::document();
        let mut parser = BlockParser::new(&lines, self.attributes.clone(), &mut ctx);
        parser.header();
        if parser.body_has_sections() {
            let mut preamble = Node::new(NodeKind::Preamble).with_attribute("role", "preamble");
            parser.parse_into(&mut preamble, &[0], Some(usize::MAX));
            if !preamble.children.is_empty() {
                root.add_child(preamble);
            }
        }
        parser.parse_into(&mut root, &[], None);
        log::trace!("parsed {} lines into {} blocks", lines.len(), root.children.len());

        for (name, value) in ctx.document_attributes.iter() {
            root.set_attribute(name, value);
        }
        if root.attribute("doctype").is_none() {
            root.set_attribute("doctype", DEFAULT_DOCTYPE);
        }
        ParsedDoc {
            root,
            anchors: ctx.anchors,
        }
    }
}

/// Parses `text` with no seeded attributes.
pub fn parse_document(text: &str) -> Node {
    Parser::new().parse(text)
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
