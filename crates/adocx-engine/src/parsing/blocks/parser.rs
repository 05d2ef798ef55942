use crate::ast::{Node, NodeKind};
use crate::context::{AnchorRegistry, AttributeTable, ParseContext};
use crate::parsing::attrlist::AttrList;
use crate::parsing::inline::parse_inline;

use super::kinds::{
    Admonition, AttributeEntry, BlockDelimiter, BlockMacroLine, BlockMeta, Delimiter, ListMarker,
    SectionHeading, alt_from_src, generate_id,
};

pub const THEMATIC_BREAK: &str = "'''";
pub const PAGE_BREAK: &str = "<<<";
/// A line holding only `+` attaches the next block to the preceding list item.
pub const CONTINUATION: &str = "+";
/// Trailing marker of a line that ends with a hard line break.
pub const HARD_BREAK: &str = " +";

/// Line-oriented block parser.
///
/// One instance walks one slice of lines. Delimited blocks with nested content (example,
/// sidebar, quote, open) are parsed by a fresh instance over the enclosed lines, seeded
/// with a copy of the attribute table and sharing the [`ParseContext`].
///
/// Every node is placed at a known child-index path from the document root, so anchors
/// can be registered while the tree is still being built.
pub struct BlockParser<'a, 'c> {
    pub(super) lines: &'a [&'a str],
    pub(super) pos: usize,
    pub(super) attributes: AttributeTable,
    pub(super) ctx: &'c mut ParseContext,
    /// Metadata lines waiting for the next block.
    pub(super) pending: BlockMeta,
}

impl<'a, 'c> BlockParser<'a, 'c> {
    pub fn new(lines: &'a [&'a str], attributes: AttributeTable, ctx: &'c mut ParseContext) -> Self {
        Self {
            lines,
            pos: 0,
            attributes,
            ctx,
            pending: BlockMeta::default(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub(super) fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Parses blocks into `parent` until the input ends or a section heading with a level
    /// at or above `max_level` is reached. The heading is left unconsumed.
    pub fn parse_into(&mut self, parent: &mut Node, path: &[usize], max_level: Option<usize>) {
        while !self.is_done() {
            if !self.step(parent, path, max_level) {
                break;
            }
        }
    }

    /// Dispatches the block at the cursor. Returns `false` when a heading ends this level.
    pub(super) fn step(
        &mut self,
        parent: &mut Node,
        path: &[usize],
        max_level: Option<usize>,
    ) -> bool {
        let Some(line) = self.current() else {
            return false;
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            self.pos += 1;
            return true;
        }
        if let Some(delimiter) = Delimiter::detect(trimmed) {
            self.delimited(delimiter, parent, path);
            return true;
        }
        if is_comment(trimmed) {
            self.pos += 1;
            return true;
        }
        if let Some(heading) = SectionHeading::parse(trimmed) {
            if max_level.is_some_and(|max| heading.level <= max) {
                return false;
            }
            self.section(heading, parent, path);
            return true;
        }
        if let Some(block_macro) = BlockMacroLine::parse(trimmed) {
            self.block_macro(block_macro, parent, path);
            return true;
        }
        if let Some(title) = BlockMeta::title_line(trimmed) {
            self.pending.title = Some(title.to_string());
            self.pos += 1;
            return true;
        }
        if let Some(raw) = BlockMeta::attribute_line(trimmed) {
            self.pending.absorb(raw);
            self.pos += 1;
            return true;
        }
        if let Some((id, label)) = BlockMacroLine::anchor(trimmed) {
            self.block_anchor(id, label, parent, path);
            return true;
        }
        if let Some(marker) = ListMarker::parse(trimmed) {
            self.list(marker, parent, path);
            return true;
        }
        if let Some((kind, text)) = Admonition::detect(trimmed) {
            self.admonition_paragraph(kind, &text, parent, path);
            return true;
        }
        if let Some(image) = BlockMacroLine::image(trimmed) {
            self.block_image(image, parent, path);
            return true;
        }
        if trimmed == THEMATIC_BREAK {
            self.break_block(NodeKind::ThematicBreak, parent);
            return true;
        }
        if trimmed == PAGE_BREAK {
            self.break_block(NodeKind::PageBreak, parent);
            return true;
        }
        if let Some(entry) = AttributeEntry::parse(trimmed) {
            self.assign(entry);
            self.pos += 1;
            return true;
        }

        self.paragraph(parent, path);
        true
    }

    /// Applies an attribute entry to this parser's table and to the document.
    pub(super) fn assign(&mut self, entry: AttributeEntry) {
        match entry.value {
            Some(value) => {
                let value = self.attributes.substitute(&value).into_owned();
                self.attributes.set(&entry.name, &value);
                self.ctx.document_attributes.set(entry.name, value);
            }
            None => {
                self.attributes.unset(&entry.name);
                self.ctx.document_attributes.unset(&entry.name);
            }
        }
    }

    fn section(&mut self, heading: SectionHeading, parent: &mut Node, path: &[usize]) {
        self.pos += 1;
        let meta = std::mem::take(&mut self.pending);
        let title = self.attributes.substitute(&heading.title).into_owned();
        let style = meta.style().filter(|style| SectionHeading::is_style(style));
        let id = match meta
            .id
            .clone()
            .or_else(|| meta.style().filter(|s| !SectionHeading::is_style(s)).map(str::to_string))
        {
            Some(id) => id,
            None => self.unique_id(&title),
        };

        let section_path = child_path(parent, path);
        let mut section = Node::new(NodeKind::Section)
            .with_attribute("level", heading.level.to_string())
            .with_attribute("id", id.as_str())
            .with_attribute("title", title.as_str());
        if let Some(style) = style {
            section.set_attribute("style", style);
        }
        if let Some(role) = meta.role() {
            section.set_attribute("role", role);
        }
        self.ctx
            .anchors
            .register_section(&id, section_path.clone(), &title);

        if !SectionHeading::is_discrete(style) {
            self.parse_into(&mut section, &section_path, Some(heading.level));
        }
        parent.add_child(section);
    }

    fn unique_id(&self, title: &str) -> String {
        let base = generate_id(title);
        if !self.ctx.anchors.contains(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.ctx.anchors.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn delimited(&mut self, delimiter: Delimiter, parent: &mut Node, path: &[usize]) {
        let lines = self.lines;
        let start = (self.pos + 1).min(lines.len());
        let rest = &lines[start..];
        let body = match delimiter.find_close(rest) {
            Some(close) => {
                self.pos = start + close + 1;
                &rest[..close]
            }
            None => {
                log::debug!(
                    "unterminated {:?} block opened at line {}",
                    delimiter.kind,
                    self.pos + 1
                );
                self.pos = lines.len();
                rest
            }
        };

        let meta = std::mem::take(&mut self.pending);
        let node_path = child_path(parent, path);
        let node = match delimiter.kind {
            BlockDelimiter::Comment => {
                self.pending = meta;
                return;
            }
            BlockDelimiter::Listing | BlockDelimiter::Fenced => {
                code_block(body, &meta, delimiter.language)
            }
            BlockDelimiter::Literal => verbatim(NodeKind::LiteralBlock, body),
            BlockDelimiter::Passthrough => Node::passthrough(body.join("\n")),
            BlockDelimiter::Example => {
                let mut node = match meta.style().and_then(Admonition::from_style) {
                    Some(kind) => Node::new(NodeKind::Admonition).with_attribute("type", kind),
                    None => Node::new(NodeKind::Example),
                };
                self.nested(body, &mut node, &node_path);
                node
            }
            BlockDelimiter::Sidebar => {
                let mut node = Node::new(NodeKind::Sidebar);
                self.nested(body, &mut node, &node_path);
                node
            }
            BlockDelimiter::Quote => match meta.style() {
                Some("verse") => with_attribution(verbatim(NodeKind::Verse, body), &meta),
                _ => {
                    let mut node = with_attribution(Node::new(NodeKind::Quote), &meta);
                    self.nested(body, &mut node, &node_path);
                    node
                }
            },
            BlockDelimiter::Open => {
                let mut node = match meta.style() {
                    Some(style) => match Admonition::from_style(style) {
                        Some(kind) => {
                            Node::new(NodeKind::Admonition).with_attribute("type", kind)
                        }
                        None => Node::new(NodeKind::OpenBlock).with_attribute("style", style),
                    },
                    None => Node::new(NodeKind::OpenBlock),
                };
                self.nested(body, &mut node, &node_path);
                node
            }
            BlockDelimiter::Table => self.table(body, &meta, &node_path),
        };
        self.place(node, &meta, parent, node_path);
    }

    /// Parses `body` into `node` with a fresh parser that shares the document context.
    pub(super) fn nested(&mut self, body: &'a [&'a str], node: &mut Node, node_path: &[usize]) {
        let mut parser = BlockParser::new(body, self.attributes.clone(), &mut *self.ctx);
        parser.parse_into(node, node_path, None);
    }

    /// Applies the block's id, role and title, registers the id and appends the node.
    pub(super) fn place(
        &mut self,
        mut node: Node,
        meta: &BlockMeta,
        parent: &mut Node,
        node_path: Vec<usize>,
    ) {
        let title = meta
            .title
            .as_deref()
            .map(|title| self.attributes.substitute(title).into_owned());
        if let Some(title) = &title {
            node.set_attribute("title", title.as_str());
        }
        if let Some(role) = meta.role() {
            node.set_attribute("role", role);
        }
        if let Some(id) = &meta.id {
            node.set_attribute("id", id.as_str());
            self.ctx
                .anchors
                .register(id.as_str(), node_path, title.unwrap_or_default());
        }
        parent.add_child(node);
    }

    fn block_macro(&mut self, line: BlockMacroLine, parent: &mut Node, path: &[usize]) {
        self.pos += 1;
        let meta = std::mem::take(&mut self.pending);
        let mut node = Node::block_macro(line.name.as_str());
        let target_key = match line.name.as_str() {
            "component" => "component-name",
            "include" => "target",
            _ => "src",
        };
        if !line.target.is_empty() {
            node.set_attribute(target_key, self.attributes.substitute(&line.target));
        }
        for (key, value) in AttrList::parse(&line.attributes).named {
            node.set_attribute(key, self.attributes.substitute(&value));
        }
        let node_path = child_path(parent, path);
        self.place(node, &meta, parent, node_path);
    }

    fn block_image(&mut self, image: BlockMacroLine, parent: &mut Node, path: &[usize]) {
        self.pos += 1;
        let meta = std::mem::take(&mut self.pending);
        let list = AttrList::parse(&image.attributes);
        let src = self.attributes.substitute(&image.target).into_owned();
        let alt = match list.positional(0) {
            Some(alt) => self.attributes.substitute(alt).into_owned(),
            None => alt_from_src(&src),
        };
        let mut node = Node::block_macro("image")
            .with_attribute("src", src)
            .with_attribute("alt", alt);
        if let Some(width) = list.positional(1) {
            node.set_attribute("width", width);
        }
        if let Some(height) = list.positional(2) {
            node.set_attribute("height", height);
        }
        for (key, value) in list.named {
            node.set_attribute(key, value);
        }
        let node_path = child_path(parent, path);
        self.place(node, &meta, parent, node_path);
    }

    fn block_anchor(
        &mut self,
        id: String,
        label: Option<String>,
        parent: &mut Node,
        path: &[usize],
    ) {
        self.pos += 1;
        let node_path = child_path(parent, path);
        let mut node = Node::block_macro("anchor").with_attribute("id", id.as_str());
        if let Some(label) = &label {
            node.set_attribute("label", label.as_str());
        }
        self.ctx
            .anchors
            .register(id, node_path, label.unwrap_or_default());
        parent.add_child(node);
    }

    fn break_block(&mut self, kind: NodeKind, parent: &mut Node) {
        self.pos += 1;
        self.pending = BlockMeta::default();
        parent.add_child(Node::new(kind));
    }

    /// Lines continuing the paragraph-like block before the cursor, up to a blank line or
    /// the start of another block. Attribute entries met on the way are applied.
    pub(super) fn continuation_lines(&mut self) -> Vec<&'a str> {
        let mut lines = Vec::new();
        while let Some(line) = self.current() {
            let trimmed = line.trim();
            if trimmed.is_empty() || self.interrupts(trimmed) {
                break;
            }
            self.pos += 1;
            if let Some(entry) = AttributeEntry::parse(trimmed) {
                self.assign(entry);
                continue;
            }
            if !is_comment(trimmed) {
                lines.push(line);
            }
        }
        lines
    }

    fn interrupts(&self, line: &str) -> bool {
        line == CONTINUATION
            || line == THEMATIC_BREAK
            || line == PAGE_BREAK
            || Delimiter::detect(line).is_some()
            || SectionHeading::parse(line).is_some()
            || BlockMacroLine::parse(line).is_some()
            || BlockMacroLine::image(line).is_some()
            || BlockMacroLine::anchor(line).is_some()
            || BlockMeta::attribute_line(line).is_some()
            || ListMarker::parse(line).is_some()
            || Admonition::detect(line).is_some()
    }

    fn paragraph(&mut self, parent: &mut Node, path: &[usize]) {
        let Some(first) = self.current() else {
            return;
        };
        self.pos += 1;
        let mut lines = vec![first];
        lines.extend(self.continuation_lines());

        let meta = std::mem::take(&mut self.pending);
        let node_path = child_path(parent, path);
        let admonition = meta.style().and_then(Admonition::from_style);
        let node = match (meta.style(), admonition) {
            (_, Some(kind)) => {
                let inner = [node_path.as_slice(), &[0]].concat();
                let paragraph = self.paragraph_node(&lines, &inner);
                Node::new(NodeKind::Admonition)
                    .with_attribute("type", kind)
                    .with_child(paragraph)
            }
            (Some("quote"), _) => {
                let inner = [node_path.as_slice(), &[0]].concat();
                let paragraph = self.paragraph_node(&lines, &inner);
                with_attribution(Node::new(NodeKind::Quote), &meta).with_child(paragraph)
            }
            (Some("verse"), _) => {
                let trimmed: Vec<&str> = lines.iter().map(|line| line.trim()).collect();
                with_attribution(verbatim(NodeKind::Verse, &trimmed), &meta)
            }
            (Some("source" | "listing"), _) => code_block(&dedent(&lines), &meta, None),
            (Some("literal"), _) => verbatim(NodeKind::LiteralBlock, &dedent(&lines)),
            _ if first.starts_with([' ', '\t']) => {
                verbatim(NodeKind::LiteralBlock, &dedent(&lines))
            }
            _ => self.paragraph_node(&lines, &node_path),
        };
        self.place(node, &meta, parent, node_path);
    }

    fn admonition_paragraph(
        &mut self,
        kind: String,
        text: &str,
        parent: &mut Node,
        path: &[usize],
    ) {
        self.pos += 1;
        let mut lines = vec![text];
        lines.extend(self.continuation_lines());

        let meta = std::mem::take(&mut self.pending);
        let node_path = child_path(parent, path);
        let inner = [node_path.as_slice(), &[0]].concat();
        let paragraph = self.paragraph_node(&lines, &inner);
        let node = Node::new(NodeKind::Admonition)
            .with_attribute("type", kind)
            .with_child(paragraph);
        self.place(node, &meta, parent, node_path);
    }

    fn paragraph_node(&mut self, lines: &[&str], node_path: &[usize]) -> Node {
        Node::new(NodeKind::Paragraph).with_children(self.inline_lines(lines, node_path))
    }

    /// Joins lines with single spaces and parses them as inline content. A line ending in
    /// ` +` closes a segment with a `br` macro.
    pub(super) fn inline_lines(&mut self, lines: &[&str], base: &[usize]) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut segment = String::new();
        for line in lines {
            let line = line.trim();
            match line.strip_suffix(HARD_BREAK) {
                Some(text) => {
                    push_joined(&mut segment, text);
                    let parsed = self.inline(&segment, base, nodes.len());
                    nodes.extend(parsed);
                    nodes.push(Node::inline_macro("br"));
                    segment.clear();
                }
                None => push_joined(&mut segment, line),
            }
        }
        if !segment.is_empty() {
            let parsed = self.inline(&segment, base, nodes.len());
            nodes.extend(parsed);
        }
        nodes
    }

    /// Parses one span of inline text whose nodes will sit at `base` from index `offset`,
    /// registering any inline anchors it declares.
    pub(super) fn inline(&mut self, text: &str, base: &[usize], offset: usize) -> Vec<Node> {
        let nodes = parse_inline(text, &self.attributes, &mut *self.ctx);
        register_inline_anchors(&mut self.ctx.anchors, &nodes, base, offset);
        nodes
    }
}

/// Path of the next child appended to `parent`.
pub(super) fn child_path(parent: &Node, path: &[usize]) -> Vec<usize> {
    let mut child = path.to_vec();
    child.push(parent.children.len());
    child
}

/// A single-line comment. `////` opens a comment block instead.
pub(super) fn is_comment(line: &str) -> bool {
    line.starts_with("//") && Delimiter::detect(line).is_none()
}

fn register_inline_anchors(
    anchors: &mut AnchorRegistry,
    nodes: &[Node],
    base: &[usize],
    offset: usize,
) {
    for (index, node) in nodes.iter().enumerate() {
        let mut path = base.to_vec();
        path.push(offset + index);
        if node.macro_name() == Some("anchor") {
            if let Some(id) = node.attribute("id") {
                anchors.register(id, path.clone(), node.attribute_or_empty("label"));
            }
        }
        register_inline_anchors(anchors, &node.children, &path, 0);
    }
}

fn push_joined(segment: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !segment.is_empty() {
        segment.push(' ');
    }
    segment.push_str(text);
}

fn verbatim(kind: NodeKind, lines: &[&str]) -> Node {
    Node::new(kind).with_child(Node::text(lines.join("\n")))
}

fn code_block(lines: &[&str], meta: &BlockMeta, fence_language: Option<String>) -> Node {
    let language = fence_language.or_else(|| match meta.style() {
        Some("source") => meta.positional(0).map(str::to_string),
        Some("listing") | None => None,
        Some(style) => Some(style.to_string()),
    });
    let mut node = Node::new(NodeKind::CodeBlock);
    if let Some(language) = language {
        node.set_attribute("language", language);
    }
    node.with_child(Node::text(lines.join("\n")))
}

fn with_attribution(mut node: Node, meta: &BlockMeta) -> Node {
    if let Some(attribution) = meta.positional(0).or_else(|| meta.named("attribution")) {
        node.set_attribute("attribution", attribution);
    }
    if let Some(citation) = meta.positional(1).or_else(|| meta.named("citetitle")) {
        node.set_attribute("citation", citation);
    }
    node
}

/// Removes the indentation shared by every non-blank line.
fn dedent<'l>(lines: &[&'l str]) -> Vec<&'l str> {
    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect()
}
