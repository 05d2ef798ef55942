use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ast::{Node, NodeKind};

pub const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Renders `root` as XML with one element per node.
///
/// Elements holding only inline content are written on one line; block containers put
/// each child on its own indented line.
pub fn render_xml(root: &Node) -> String {
    let mut out = String::from(XML_PROLOG);
    out.push('\n');
    write_element(&mut out, root, 0);
    out
}

/// Element name and, for macros, the `type`/`name` attributes written before the
/// node's own attributes.
fn element(kind: &NodeKind) -> (&'static str, Option<(&'static str, &str)>) {
    match kind {
        NodeKind::Document => ("document", None),
        NodeKind::Preamble => ("preamble", None),
        NodeKind::Section => ("section", None),
        NodeKind::Paragraph => ("paragraph", None),
        NodeKind::BlockMacro(name) => ("macro", Some(("block", name))),
        NodeKind::InlineMacro(name) => ("macro", Some(("inline", name))),
        NodeKind::Text(_) => ("text", None),
        NodeKind::List => ("list", None),
        NodeKind::ListItem => ("listitem", None),
        NodeKind::CodeBlock => ("codeblock", None),
        NodeKind::LiteralBlock => ("literalblock", None),
        NodeKind::Example => ("example", None),
        NodeKind::Sidebar => ("sidebar", None),
        NodeKind::Quote => ("quote", None),
        NodeKind::Verse => ("verseblock", None),
        NodeKind::OpenBlock => ("openblock", None),
        NodeKind::Table => ("table", None),
        NodeKind::TableRow => ("row", None),
        NodeKind::TableCell => ("cell", None),
        NodeKind::Admonition => ("admonition", None),
        NodeKind::ThematicBreak => ("thematicbreak", None),
        NodeKind::PageBreak => ("pagebreak", None),
        NodeKind::Bold => ("strong", None),
        NodeKind::Italic => ("emphasis", None),
        NodeKind::Monospace => ("monospace", None),
        NodeKind::Superscript => ("superscript", None),
        NodeKind::Subscript => ("subscript", None),
        NodeKind::Highlight => ("highlight", None),
        NodeKind::Link => ("link", None),
        NodeKind::Passthrough(_) => ("passthrough", None),
    }
}

fn is_inline(node: &Node) -> bool {
    node.kind.is_inline() || matches!(node.kind, NodeKind::Passthrough(_))
}

fn write_element(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    write_node(out, node, depth);
    out.push('\n');
}

/// Writes `node` without surrounding whitespace, switching to indented children when it
/// holds block content. `depth` is the indentation level of the node's own start tag.
fn write_node(out: &mut String, node: &Node, depth: usize) {
    if let NodeKind::Text(content) = &node.kind {
        out.push_str(&encode_text(content));
        return;
    }
    let (name, prefix) = element(&node.kind);
    out.push('<');
    out.push_str(name);
    write_attributes(out, node, prefix);

    if let NodeKind::Passthrough(content) = &node.kind {
        out.push_str("><![CDATA[");
        out.push_str(&content.replace("]]>", "]]]]><![CDATA[>"));
        out.push_str("]]></");
        out.push_str(name);
        out.push('>');
        return;
    }
    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if node.children.iter().all(is_inline) {
        for child in &node.children {
            write_node(out, child, depth);
        }
    } else {
        out.push('\n');
        for child in &node.children {
            write_element(out, child, depth + 1);
        }
        out.push_str(&"  ".repeat(depth));
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_attributes(out: &mut String, node: &Node, prefix: Option<(&'static str, &str)>) {
    let mut written: Vec<String> = Vec::new();
    let mut write = |out: &mut String, name: String, value: &str| {
        if written.contains(&name) {
            log::debug!("dropping duplicate XML attribute `{name}`");
            return;
        }
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
        written.push(name);
    };
    if let Some((kind, macro_name)) = prefix {
        write(out, "type".to_string(), kind);
        write(out, "name".to_string(), macro_name);
    }
    for (key, value) in &node.attributes {
        write(out, sanitize_attribute_name(key), value);
    }
}

/// Turns an arbitrary attribute key into a valid XML attribute name.
///
/// Leading and trailing `:` are stripped, inner `:` becomes `-`, other invalid characters
/// become `_`, and a name that would start with a digit, `-` or `.` gets a `_` prefix.
/// A key with nothing left becomes `attr`.
pub fn sanitize_attribute_name(key: &str) -> String {
    let trimmed = key.trim_matches(':');
    if trimmed.is_empty() {
        return "attr".to_string();
    }
    let mut name: String = trimmed
        .chars()
        .map(|c| match c {
            ':' => '-',
            c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') => c,
            _ => '_',
        })
        .collect();
    if name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.')
    {
        name.insert(0, '_');
    }
    name
}
