/// The kind of a document tree node.
///
/// Only `Text` and `Passthrough` carry content, and only the two macro kinds carry a
/// name. Every other piece of node data lives in the node's attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of every parsed tree.
    Document,
    /// Content before the first section, only present when the document has sections.
    Preamble,
    /// A titled section (`== Title`). Attributes: `level`, `id`, `title`.
    Section,
    Paragraph,
    /// A block macro such as `image::`, `video::`, `toc::` or a `[[id]]` anchor.
    BlockMacro(String),
    /// An inline macro such as `kbd:[...]`, `<<xref>>`, `footnote:[...]`.
    InlineMacro(String),
    /// Literal character data.
    Text(String),
    /// A list. Attribute `style` is one of `ordered`, `unordered`, `labeled`, `callout`.
    List,
    ListItem,
    /// A verbatim listing block (`----` or a backtick fence).
    CodeBlock,
    /// A verbatim literal block (`....`).
    LiteralBlock,
    Example,
    Sidebar,
    Quote,
    Verse,
    OpenBlock,
    Table,
    TableRow,
    TableCell,
    /// `NOTE:`/`TIP:`/`IMPORTANT:`/`WARNING:`/`CAUTION:` block. Attribute `type` is lowercase.
    Admonition,
    ThematicBreak,
    PageBreak,
    Bold,
    Italic,
    Monospace,
    Superscript,
    Subscript,
    Highlight,
    /// A hyperlink. Attribute `href`, children are the link text.
    Link,
    /// Raw content emitted unescaped by the HTML renderer.
    Passthrough(String),
}

impl NodeKind {
    /// The stable tag name of this kind, used by `Node::find_by_tag` and debug output.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Preamble => "Preamble",
            NodeKind::Section => "Section",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::BlockMacro(_) => "BlockMacro",
            NodeKind::InlineMacro(_) => "InlineMacro",
            NodeKind::Text(_) => "Text",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::LiteralBlock => "LiteralBlock",
            NodeKind::Example => "Example",
            NodeKind::Sidebar => "Sidebar",
            NodeKind::Quote => "Quote",
            NodeKind::Verse => "Verse",
            NodeKind::OpenBlock => "OpenBlock",
            NodeKind::Table => "Table",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableCell => "TableCell",
            NodeKind::Admonition => "Admonition",
            NodeKind::ThematicBreak => "ThematicBreak",
            NodeKind::PageBreak => "PageBreak",
            NodeKind::Bold => "Bold",
            NodeKind::Italic => "Italic",
            NodeKind::Monospace => "Monospace",
            NodeKind::Superscript => "Superscript",
            NodeKind::Subscript => "Subscript",
            NodeKind::Highlight => "Highlight",
            NodeKind::Link => "Link",
            NodeKind::Passthrough(_) => "Passthrough",
        }
    }

    /// Whether this kind only ever appears inside a block's inline content.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::InlineMacro(_)
                | NodeKind::Text(_)
                | NodeKind::Bold
                | NodeKind::Italic
                | NodeKind::Monospace
                | NodeKind::Superscript
                | NodeKind::Subscript
                | NodeKind::Highlight
                | NodeKind::Link
        )
    }
}
