use std::fmt::Write;

use crate::ast::{Node, NodeKind};

/// Indented outline of `root`, one node per line:
///
/// ```text
/// Document title="T"
///   Paragraph
///     Text "Hello "
///     Bold
///       Text "world"
/// ```
pub fn outline(root: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = match &node.kind {
        NodeKind::Text(content) => write!(out, "{indent}Text {content:?}"),
        NodeKind::Passthrough(content) => write!(out, "{indent}Passthrough {content:?}"),
        NodeKind::BlockMacro(name) => write!(out, "{indent}BlockMacro({name})"),
        NodeKind::InlineMacro(name) => write!(out, "{indent}InlineMacro({name})"),
        kind => write!(out, "{indent}{}", kind.name()),
    };
    for (key, value) in &node.attributes {
        let _ = write!(out, " {key}={value:?}");
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
