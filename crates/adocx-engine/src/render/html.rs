use std::collections::BTreeMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::ast::{Node, NodeKind};

/// Pico CSS served from jsDelivr, used by [`Stylesheet::Cdn`].
pub const PICO_CDN: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";

const DEFAULT_LANG: &str = "en";
const DEFAULT_TOC_TITLE: &str = "Table of Contents";
const DEFAULT_TOC_LEVELS: usize = 2;

/// Stylesheet reference emitted in the `<head>` of a standalone document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stylesheet {
    #[default]
    None,
    /// CSS text embedded in a `<style>` element.
    Inline(String),
    /// Path or URL for a `<link rel="stylesheet">`.
    Link(String),
    Cdn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
    /// Emit a full document instead of a body fragment.
    pub standalone: bool,
    /// XML prolog, XHTML namespace and self-closed void elements.
    pub xhtml: bool,
    pub stylesheet: Stylesheet,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Overrides the `lang` document attribute.
    pub lang: Option<String>,
}

/// Document metadata as seen by the HTML renderer, with option overrides applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl DocumentMeta {
    pub fn from_document(root: &Node, options: &HtmlOptions) -> Self {
        Self {
            title: options
                .title
                .clone()
                .or_else(|| root.attribute("title").map(str::to_string)),
            author: options
                .author
                .clone()
                .or_else(|| root.attribute("author").map(str::to_string)),
            attributes: root.attributes.clone(),
        }
    }
}

pub fn render_html(root: &Node, options: &HtmlOptions) -> String {
    render_html_document(root, options).0
}

/// Renders `root` and returns the markup together with its metadata.
pub fn render_html_document(root: &Node, options: &HtmlOptions) -> (String, DocumentMeta) {
    let meta = DocumentMeta::from_document(root, options);
    let mut renderer = HtmlRenderer::new(root, options);
    if options.standalone {
        renderer.standalone(&meta);
    } else {
        renderer.body();
    }
    (renderer.out, meta)
}

struct HtmlRenderer<'r> {
    root: &'r Node,
    options: &'r HtmlOptions,
    out: String,
    /// Footnote number and rendered text, in order of appearance.
    footnotes: Vec<(String, String)>,
}

impl<'r> HtmlRenderer<'r> {
    fn new(root: &'r Node, options: &'r HtmlOptions) -> Self {
        Self {
            root,
            options,
            out: String::new(),
            footnotes: Vec::new(),
        }
    }

    /// End of a void element.
    fn void_end(&self) -> &'static str {
        if self.options.xhtml { "/>" } else { ">" }
    }

    fn text(&mut self, text: &str) {
        self.out.push_str(&encode_text(text));
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&encode_double_quoted_attribute(value));
        self.out.push('"');
    }

    /// `id` and `class` from the node's id and role, with `class` prepended.
    fn id_class(&mut self, node: &Node, class: Option<&str>) {
        if let Some(id) = node.attribute("id") {
            self.attr("id", id);
        }
        let classes: Vec<&str> = class.into_iter().chain(node.attribute("role")).collect();
        if !classes.is_empty() {
            self.attr("class", &classes.join(" "));
        }
    }

    fn open(&mut self, tag: &str, node: &Node, class: Option<&str>) {
        self.out.push('<');
        self.out.push_str(tag);
        self.id_class(node, class);
        self.out.push_str(">\n");
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn block_title(&mut self, node: &Node) {
        if let Some(title) = node.attribute("title") {
            self.out.push_str("<div class=\"title\">");
            self.text(title);
            self.out.push_str("</div>\n");
        }
    }

    fn standalone(&mut self, meta: &DocumentMeta) {
        let lang = self
            .options
            .lang
            .as_deref()
            .or_else(|| self.root.attribute("lang"))
            .unwrap_or(DEFAULT_LANG)
            .to_string();

        if self.options.xhtml {
            self.out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        self.out.push_str("<!DOCTYPE html>\n<html");
        if self.options.xhtml {
            self.attr("xmlns", "http://www.w3.org/1999/xhtml");
        }
        self.attr("lang", &lang);
        self.out.push_str(">\n<head>\n<meta charset=\"UTF-8\"");
        let end = self.void_end();
        self.out.push_str(end);
        self.out.push('\n');
        if let Some(title) = &meta.title {
            self.out.push_str("<title>");
            self.text(title);
            self.out.push_str("</title>\n");
        }
        self.stylesheet();
        self.out.push_str("</head>\n<body>\n");
        self.header(meta);
        self.out.push_str("<main>\n");
        self.body();
        self.out.push_str("</main>\n</body>\n</html>\n");
    }

    fn stylesheet(&mut self) {
        let options = self.options;
        let href = match &options.stylesheet {
            Stylesheet::None => return,
            Stylesheet::Inline(css) => {
                self.out.push_str("<style>\n");
                self.out.push_str(css);
                self.out.push_str("\n</style>\n");
                return;
            }
            Stylesheet::Link(path) => path.as_str(),
            Stylesheet::Cdn => PICO_CDN,
        };
        self.out.push_str("<link rel=\"stylesheet\"");
        self.attr("href", href);
        let end = self.void_end();
        self.out.push_str(end);
        self.out.push('\n');
    }

    fn header(&mut self, meta: &DocumentMeta) {
        if meta.title.is_none() && meta.author.is_none() {
            return;
        }
        let root = self.root;
        self.out.push_str("<header>\n");
        if let Some(title) = &meta.title {
            self.out.push_str("<h1>");
            self.text(title);
            self.out.push_str("</h1>\n");
        }
        if let Some(author) = &meta.author {
            self.out.push_str("<p class=\"details\"><span class=\"author\">");
            self.text(author);
            self.out.push_str("</span>");
            if let Some(email) = root.attribute("email") {
                self.out.push_str(" <a class=\"email\"");
                self.attr("href", &format!("mailto:{email}"));
                self.out.push('>');
                self.text(email);
                self.out.push_str("</a>");
            }
            self.out.push_str("</p>\n");
        }
        let revision: Vec<&str> = ["revnumber", "revdate", "revremark"]
            .into_iter()
            .filter_map(|name| root.attribute(name))
            .collect();
        if !revision.is_empty() {
            self.out.push_str("<p class=\"revision\">");
            self.text(&revision.join(", "));
            self.out.push_str("</p>\n");
        }
        self.out.push_str("</header>\n");
    }

    fn body(&mut self) {
        let root = self.root;
        if root.attribute("toc").is_some_and(|placement| placement != "macro") {
            self.toc();
        }
        self.blocks(root);
        self.footnote_list();
    }

    fn blocks(&mut self, node: &Node) {
        for child in &node.children {
            self.block(child);
        }
    }

    fn inlines(&mut self, node: &Node) {
        for child in &node.children {
            self.inline(child);
        }
    }

    /// Inline children stay on the current line; block children start new lines.
    fn mixed(&mut self, node: &Node) {
        let mut after_block = false;
        for child in &node.children {
            if child.kind.is_inline() || matches!(child.kind, NodeKind::Passthrough(_)) {
                self.inline(child);
                after_block = false;
            } else {
                if !after_block {
                    self.out.push('\n');
                }
                self.block(child);
                after_block = true;
            }
        }
    }

    fn block(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Document => self.blocks(node),
            NodeKind::Preamble => {
                self.out.push_str("<div data-role=\"preamble\">\n");
                self.blocks(node);
                self.close("div");
            }
            NodeKind::Section => self.section(node),
            NodeKind::Paragraph => {
                self.block_title(node);
                self.out.push_str("<p");
                self.id_class(node, None);
                self.out.push('>');
                self.inlines(node);
                self.out.push_str("</p>\n");
            }
            NodeKind::List => self.list(node),
            NodeKind::CodeBlock => {
                self.block_title(node);
                self.out.push_str("<pre");
                self.id_class(node, None);
                self.out.push_str("><code");
                if let Some(language) = node.attribute("language") {
                    self.attr("class", &format!("language-{language}"));
                    self.attr("data-language", language);
                }
                self.out.push('>');
                self.text(&node.text_content());
                self.out.push_str("</code></pre>\n");
            }
            NodeKind::LiteralBlock => {
                self.block_title(node);
                self.out.push_str("<pre");
                self.id_class(node, Some("literal-block"));
                self.out.push('>');
                self.text(&node.text_content());
                self.out.push_str("</pre>\n");
            }
            NodeKind::Example => {
                self.open("div", node, Some("example"));
                self.block_title(node);
                self.blocks(node);
                self.close("div");
            }
            NodeKind::Sidebar => {
                self.open("aside", node, Some("sidebar"));
                self.block_title(node);
                self.blocks(node);
                self.close("aside");
            }
            NodeKind::Quote => {
                self.block_title(node);
                self.open("blockquote", node, Some("quote"));
                self.blocks(node);
                self.attribution(node);
                self.close("blockquote");
            }
            NodeKind::Verse => {
                self.block_title(node);
                self.open("blockquote", node, Some("verse"));
                self.out.push_str("<pre class=\"verse\">");
                self.text(&node.text_content());
                self.out.push_str("</pre>\n");
                self.attribution(node);
                self.close("blockquote");
            }
            NodeKind::OpenBlock => {
                self.open("div", node, Some("open-block"));
                self.block_title(node);
                self.blocks(node);
                self.close("div");
            }
            NodeKind::Table => self.table(node),
            NodeKind::Admonition => {
                let kind = node.attribute_or_empty("type");
                let class = format!("admonition admonition-{kind}");
                self.open("div", node, Some(&class));
                self.out.push_str("<p class=\"admonition-title\">");
                match node.attribute("title") {
                    Some(title) => self.text(title),
                    None => self.text(&kind.to_uppercase()),
                }
                self.out.push_str("</p>\n");
                self.blocks(node);
                self.close("div");
            }
            NodeKind::ThematicBreak => {
                self.out.push_str("<hr");
                let end = self.void_end();
                self.out.push_str(end);
                self.out.push('\n');
            }
            NodeKind::PageBreak => self.out.push_str("<div class=\"page-break\"></div>\n"),
            NodeKind::BlockMacro(name) => self.block_macro(name, node),
            NodeKind::Passthrough(content) => {
                self.out.push_str(content);
                self.out.push('\n');
            }
            NodeKind::ListItem | NodeKind::TableRow | NodeKind::TableCell => self.mixed(node),
            NodeKind::InlineMacro(_)
            | NodeKind::Text(_)
            | NodeKind::Bold
            | NodeKind::Italic
            | NodeKind::Monospace
            | NodeKind::Superscript
            | NodeKind::Subscript
            | NodeKind::Highlight
            | NodeKind::Link => {
                self.inline(node);
                self.out.push('\n');
            }
        }
    }

    fn section(&mut self, node: &Node) {
        let level: usize = node
            .attribute("level")
            .and_then(|level| level.parse().ok())
            .unwrap_or(1);
        let heading = format!("h{}", (level + 1).min(6));
        let discrete = matches!(node.attribute("style"), Some("discrete" | "float"));

        if !discrete {
            self.out.push_str("<section");
            let class = format!("sect{level}");
            let classes: Vec<&str> = std::iter::once(class.as_str())
                .chain(node.attribute("role"))
                .collect();
            self.attr("class", &classes.join(" "));
            self.out.push_str(">\n");
        }
        self.out.push('<');
        self.out.push_str(&heading);
        if let Some(id) = node.attribute("id") {
            self.attr("id", id);
        }
        if discrete {
            self.attr("class", "discrete");
        }
        self.out.push('>');
        self.text(node.attribute_or_empty("title"));
        self.out.push_str("</");
        self.out.push_str(&heading);
        self.out.push_str(">\n");
        if !discrete {
            self.blocks(node);
            self.close("section");
        }
    }

    fn attribution(&mut self, node: &Node) {
        let attribution = node.attribute("attribution");
        let citation = node.attribute("citation");
        if attribution.is_none() && citation.is_none() {
            return;
        }
        self.out.push_str("<footer>");
        if let Some(attribution) = attribution {
            self.text(attribution);
        }
        if let Some(citation) = citation {
            if attribution.is_some() {
                self.out.push_str(", ");
            }
            self.out.push_str("<cite>");
            self.text(citation);
            self.out.push_str("</cite>");
        }
        self.out.push_str("</footer>\n");
    }

    fn list(&mut self, node: &Node) {
        self.block_title(node);
        let style = node.attribute_or_empty("style");
        let (tag, class) = match style {
            "ordered" => ("ol", None),
            "labeled" => ("dl", None),
            "callout" => ("ol", Some("callout-list")),
            _ => ("ul", None),
        };
        self.open(tag, node, class);
        for item in &node.children {
            if style == "labeled" {
                self.out.push_str("<dt>");
                self.text(item.attribute_or_empty("term"));
                self.out.push_str("</dt>\n<dd>");
                self.mixed(item);
                self.out.push_str("</dd>\n");
                continue;
            }
            self.out.push_str("<li>");
            if let Some(checked) = item.attribute("checked") {
                self.out.push_str("<input type=\"checkbox\" disabled=\"disabled\"");
                if checked == "true" {
                    self.out.push_str(" checked=\"checked\"");
                }
                let end = self.void_end();
                self.out.push_str(end);
                self.out.push(' ');
            }
            self.mixed(item);
            self.out.push_str("</li>\n");
        }
        self.close(tag);
    }

    fn table(&mut self, node: &Node) {
        self.out.push_str("<table");
        self.id_class(node, Some("table"));
        self.out.push_str(">\n");
        if let Some(title) = node.attribute("title") {
            self.out.push_str("<caption>");
            self.text(title);
            self.out.push_str("</caption>\n");
        }
        let (head, body): (Vec<&Node>, Vec<&Node>) = node
            .children
            .iter()
            .partition(|row| row.attribute("role") == Some("header"));
        if !head.is_empty() {
            self.out.push_str("<thead>\n");
            for row in head {
                self.row(row, true);
            }
            self.out.push_str("</thead>\n");
        }
        if !body.is_empty() {
            self.out.push_str("<tbody>\n");
            for row in body {
                self.row(row, false);
            }
            self.out.push_str("</tbody>\n");
        }
        self.out.push_str("</table>\n");
    }

    fn row(&mut self, row: &Node, header: bool) {
        self.out.push_str("<tr>\n");
        for cell in &row.children {
            let style = cell.attribute("style");
            let tag = if header || style == Some("header") {
                "th"
            } else {
                "td"
            };
            self.out.push('<');
            self.out.push_str(tag);
            if let Some(colspan) = cell.attribute("colspan") {
                self.attr("colspan", colspan);
            }
            self.id_class(cell, None);
            let mut css = Vec::new();
            if let Some(align) = cell.attribute("align") {
                css.push(format!("text-align: {align}"));
            }
            if let Some(valign) = cell.attribute("valign") {
                css.push(format!("vertical-align: {valign}"));
            }
            if !css.is_empty() {
                self.attr("style", &css.join("; "));
            }
            self.out.push('>');
            let wrapper = match style {
                Some("monospace") => Some("code"),
                Some("strong") => Some("strong"),
                Some("emphasis") => Some("em"),
                _ => None,
            };
            if let Some(wrapper) = wrapper {
                self.out.push_str(&format!("<{wrapper}>"));
                self.mixed(cell);
                self.out.push_str(&format!("</{wrapper}>"));
            } else {
                self.mixed(cell);
            }
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push_str(">\n");
        }
        self.out.push_str("</tr>\n");
    }

    fn block_macro(&mut self, name: &str, node: &Node) {
        match name {
            "image" => {
                self.open("figure", node, Some("image"));
                let link = node.attribute("link");
                if let Some(link) = link {
                    self.out.push_str("<a");
                    self.attr("href", link);
                    self.out.push('>');
                }
                self.img(node);
                if link.is_some() {
                    self.out.push_str("</a>");
                }
                self.out.push('\n');
                if let Some(title) = node.attribute("title") {
                    self.out.push_str("<figcaption>");
                    self.text(title);
                    self.out.push_str("</figcaption>\n");
                }
                self.close("figure");
            }
            "video" | "audio" => {
                self.out.push('<');
                self.out.push_str(name);
                self.id_class(node, None);
                self.attr("src", node.attribute_or_empty("src"));
                for key in ["width", "height", "poster"] {
                    if let Some(value) = node.attribute(key) {
                        self.attr(key, value);
                    }
                }
                self.attr("controls", "controls");
                let options = node.attribute_or_empty("options");
                for flag in ["autoplay", "loop", "muted"] {
                    if options.split(',').any(|option| option.trim() == flag) {
                        self.attr(flag, flag);
                    }
                }
                self.out.push_str("></");
                self.out.push_str(name);
                self.out.push_str(">\n");
            }
            "anchor" => {
                self.out.push_str("<a");
                self.attr("id", node.attribute_or_empty("id"));
                self.out.push_str("></a>\n");
            }
            "toc" => self.toc(),
            _ => {
                self.out.push_str("<div");
                self.attr("data-macro", name);
                for (key, value) in &node.attributes {
                    if is_data_name(key) {
                        self.attr(&format!("data-{key}"), value);
                    }
                }
                self.out.push_str(">\n");
                self.blocks(node);
                self.close("div");
            }
        }
    }

    fn img(&mut self, node: &Node) {
        self.out.push_str("<img");
        self.attr("src", node.attribute_or_empty("src"));
        self.attr("alt", node.attribute_or_empty("alt"));
        for key in ["width", "height"] {
            if let Some(value) = node.attribute(key) {
                self.attr(key, value);
            }
        }
        let end = self.void_end();
        self.out.push_str(end);
    }

    fn toc(&mut self) {
        let root = self.root;
        let levels = root
            .attribute("toclevels")
            .and_then(|levels| levels.parse().ok())
            .unwrap_or(DEFAULT_TOC_LEVELS);
        let title = root
            .attribute("toc-title")
            .unwrap_or(DEFAULT_TOC_TITLE)
            .to_string();
        self.out.push_str("<nav id=\"toc\" class=\"toc\">\n<div id=\"toctitle\">");
        self.text(&title);
        self.out.push_str("</div>\n");
        self.toc_level(root, 1, levels);
        self.out.push_str("</nav>\n");
    }

    fn toc_level(&mut self, parent: &Node, level: usize, max: usize) {
        let sections: Vec<&Node> = parent
            .children
            .iter()
            .filter(|child| child.kind == NodeKind::Section)
            .filter(|child| !matches!(child.attribute("style"), Some("discrete" | "float")))
            .collect();
        if sections.is_empty() || level > max {
            return;
        }
        self.out.push_str(&format!("<ul class=\"sectlevel{level}\">\n"));
        for section in sections {
            self.out.push_str("<li><a");
            self.attr("href", &format!("#{}", section.attribute_or_empty("id")));
            self.out.push('>');
            self.text(section.attribute_or_empty("title"));
            self.out.push_str("</a>\n");
            self.toc_level(section, level + 1, max);
            self.out.push_str("</li>\n");
        }
        self.out.push_str("</ul>\n");
    }

    fn footnote_list(&mut self) {
        if self.footnotes.is_empty() {
            return;
        }
        let footnotes = std::mem::take(&mut self.footnotes);
        self.out.push_str("<div id=\"footnotes\" class=\"footnotes\">\n");
        for (index, text) in footnotes {
            self.out.push_str("<div class=\"footnote\"");
            self.attr("id", &format!("_footnotedef_{index}"));
            self.out.push_str("><a");
            self.attr("href", &format!("#_footnoteref_{index}"));
            self.out.push('>');
            self.text(&index);
            self.out.push_str("</a>. ");
            self.out.push_str(&text);
            self.out.push_str("</div>\n");
        }
        self.out.push_str("</div>\n");
    }

    fn inline(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Text(content) => self.text(content),
            NodeKind::Passthrough(content) => self.out.push_str(content),
            NodeKind::Bold => self.wrap("strong", node),
            NodeKind::Italic => self.wrap("em", node),
            NodeKind::Monospace => self.wrap("code", node),
            NodeKind::Superscript => self.wrap("sup", node),
            NodeKind::Subscript => self.wrap("sub", node),
            NodeKind::Highlight => match node.attribute("role") {
                Some(role) => {
                    self.out.push_str("<span");
                    self.attr("class", role);
                    self.out.push('>');
                    self.inlines(node);
                    self.out.push_str("</span>");
                }
                None => self.wrap("mark", node),
            },
            NodeKind::Link => {
                self.out.push_str("<a");
                self.attr("href", node.attribute_or_empty("href"));
                if let Some(title) = node.attribute("title") {
                    self.attr("title", title);
                }
                if let Some(window) = node.attribute("window") {
                    self.attr("target", window);
                    if window == "_blank" {
                        self.attr("rel", "noopener");
                    }
                }
                if let Some(role) = node.attribute("role") {
                    self.attr("class", role);
                }
                self.out.push('>');
                self.inlines(node);
                self.out.push_str("</a>");
            }
            NodeKind::InlineMacro(name) => self.inline_macro(name, node),
            NodeKind::Document
            | NodeKind::Preamble
            | NodeKind::Section
            | NodeKind::Paragraph
            | NodeKind::BlockMacro(_)
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::CodeBlock
            | NodeKind::LiteralBlock
            | NodeKind::Example
            | NodeKind::Sidebar
            | NodeKind::Quote
            | NodeKind::Verse
            | NodeKind::OpenBlock
            | NodeKind::Table
            | NodeKind::TableRow
            | NodeKind::TableCell
            | NodeKind::Admonition
            | NodeKind::ThematicBreak
            | NodeKind::PageBreak => self.block(node),
        }
    }

    fn wrap(&mut self, tag: &str, node: &Node) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.inlines(node);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn inline_macro(&mut self, name: &str, node: &Node) {
        match name {
            "xref" => {
                let target = node.attribute_or_empty("target");
                self.out.push_str("<a");
                self.attr("href", &format!("#{target}"));
                self.out.push('>');
                if node.children.is_empty() {
                    self.text(target);
                } else {
                    self.inlines(node);
                }
                self.out.push_str("</a>");
            }
            "anchor" => {
                self.out.push_str("<a");
                self.attr("id", node.attribute_or_empty("id"));
                self.out.push_str("></a>");
            }
            "footnote" => {
                let index = node.attribute_or_empty("index").to_string();
                let saved = std::mem::take(&mut self.out);
                self.inlines(node);
                let text = std::mem::replace(&mut self.out, saved);
                self.footnotes.push((index.clone(), text));
                self.out.push_str("<sup class=\"footnote\">[<a class=\"footnote\"");
                self.attr("id", &format!("_footnoteref_{index}"));
                self.attr("href", &format!("#_footnotedef_{index}"));
                self.out.push('>');
                self.text(&index);
                self.out.push_str("</a>]</sup>");
            }
            "footnoteref" => match node.attribute("index") {
                Some(index) => {
                    self.out.push_str("<sup class=\"footnoteref\">[<a class=\"footnote\"");
                    self.attr("href", &format!("#_footnotedef_{index}"));
                    self.out.push('>');
                    self.text(index);
                    self.out.push_str("</a>]</sup>");
                }
                None => self.text(node.attribute_or_empty("id")),
            },
            "image" => self.img(node),
            "br" => {
                self.out.push_str("<br");
                let end = self.void_end();
                self.out.push_str(end);
                self.out.push('\n');
            }
            "kbd" => self.wrap("kbd", node),
            "btn" => {
                self.out.push_str("<b class=\"button\">");
                self.inlines(node);
                self.out.push_str("</b>");
            }
            _ => {
                self.out.push_str("<span");
                self.attr("data-macro", name);
                if let Some(target) = node.attribute("target") {
                    self.attr("data-target", target);
                }
                self.out.push('>');
                self.inlines(node);
                self.out.push_str("</span>");
            }
        }
    }
}

/// Attribute names usable after a `data-` prefix.
fn is_data_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
