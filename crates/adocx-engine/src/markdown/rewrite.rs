use std::io::{self, Write};
use std::sync::LazyLock;

use regex::Regex;

use super::frontmatter;
use super::inline;
use super::references::{self, References};
use super::table::{self, Align};

const HTML_BLOCK_NOTE: &str = "// Raw HTML block carried over from the Markdown source";
const HTML_COMMENT_NOTE: &str = "// HTML comment carried over from the Markdown source";

const BLOCK_TAGS: [&str; 38] = [
    "div", "p", "table", "thead", "tbody", "tfoot", "tr", "th", "td", "ul", "ol", "li", "dl",
    "dt", "dd", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
    "aside", "header", "footer", "nav", "main", "figure", "figcaption", "details", "summary",
    "form", "fieldset", "legend", "hr",
];

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+#+)?\s*$").expect("Invalid heading regex"));

static SETEXT_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(=+|-+)\s*$").expect("Invalid setext regex"));

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```\s*([\w+#.-]*)\s*$").expect("Invalid fence regex"));

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```\s*$").expect("Invalid fence regex"));

static HTML_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([a-zA-Z][a-zA-Z0-9]*)(?:\s[^>]*)?>").expect("Invalid HTML open regex")
});

static HTML_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</([a-zA-Z][a-zA-Z0-9]*)>\s*$").expect("Invalid HTML close regex"));

static HTML_SELF_CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<[a-zA-Z][a-zA-Z0-9]*(?:\s[^>]*)?\s*/>\s*$").expect("Invalid HTML tag regex")
});

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--.*-->\s*$").expect("Invalid HTML comment regex"));

static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*_]{3,}\s*$").expect("Invalid rule regex"));

static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s?(.*)$").expect("Invalid blockquote regex"));

static BOLD_ADMONITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(\w+)\*\*:?\s*").expect("Invalid admonition regex"));

static ALERT_ADMONITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[!(\w+)\]\s*").expect("Invalid admonition regex"));

static TASK_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)[-*+]\s+\[([ xX])\]\s+(.+)$").expect("Invalid task list regex")
});

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+[.)]\s+(.+)$").expect("Invalid ordered list regex"));

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[-*+]\s+(.+)$").expect("Invalid unordered list regex"));

static STANDALONE_REFERENCE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!\[([^\]]*)\]\[([^\]]*)\]\s*$").expect("Invalid reference image regex")
});

const ADMONITIONS: [&str; 5] = ["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

/// Multi-line construct being collected.
#[derive(Debug)]
enum Block {
    Frontmatter(Vec<String>),
    Fenced { language: String, lines: Vec<String> },
    Indented(Vec<String>),
    Html { tag: String, lines: Vec<String> },
    Quote(Vec<String>),
    /// Rows are written as they arrive. The header row waits for the separator row so
    /// its alignments can go into `cols`.
    Table { header: Option<Vec<String>> },
}

/// Second pass of the conversion: rewrites one line at a time into `out`.
pub struct Transcoder<'r, W: Write> {
    references: &'r References,
    out: W,
    block: Option<Block>,
    /// Last paragraph line, held back in case the next line underlines it.
    held: Option<String>,
    previous_blank: bool,
    in_list: bool,
}

impl<'r, W: Write> Transcoder<'r, W> {
    pub fn new(references: &'r References, out: W) -> Self {
        Self {
            references,
            out,
            block: None,
            held: None,
            previous_blank: true,
            in_list: false,
        }
    }

    /// Rewrites every line and flushes whatever block is still open.
    pub fn run(mut self, lines: &[&str]) -> io::Result<W> {
        for (index, line) in lines.iter().enumerate() {
            self.line(index, line, lines.get(index + 1).copied())?;
            self.previous_blank = line.trim().is_empty();
        }
        self.finish()?;
        Ok(self.out)
    }

    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")
    }

    fn line(&mut self, index: usize, line: &str, next: Option<&str>) -> io::Result<()> {
        let trimmed = line.trim();

        match self.block.take() {
            Some(Block::Html { tag, mut lines }) => {
                lines.push(line.to_string());
                if closes(trimmed, &tag) {
                    return self.html_block(&lines);
                }
                self.block = Some(Block::Html { tag, lines });
                return Ok(());
            }
            Some(Block::Fenced { language, mut lines }) => {
                if FENCE_CLOSE.is_match(line) {
                    return self.code_block(&language, &lines);
                }
                lines.push(line.to_string());
                self.block = Some(Block::Fenced { language, lines });
                return Ok(());
            }
            Some(Block::Frontmatter(mut lines)) => {
                if trimmed == "---" || trimmed == "..." {
                    log::trace!("converting {} lines of frontmatter", lines.len());
                    for header in frontmatter::header_lines(&lines) {
                        self.emit(&header)?;
                    }
                    return Ok(());
                }
                lines.push(line.to_string());
                self.block = Some(Block::Frontmatter(lines));
                return Ok(());
            }
            Some(Block::Indented(mut lines)) => {
                if let Some(code) = line.strip_prefix("    ") {
                    lines.push(code.to_string());
                    self.block = Some(Block::Indented(lines));
                    return Ok(());
                }
                let continues = next.is_some_and(|n| n.starts_with("    ") || n.trim().is_empty());
                if trimmed.is_empty() && continues {
                    lines.push(String::new());
                    self.block = Some(Block::Indented(lines));
                    return Ok(());
                }
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                self.code_block("", &lines)?;
            }
            Some(Block::Quote(mut lines)) => {
                if let Some(caps) = BLOCKQUOTE.captures(line) {
                    lines.push(caps[1].to_string());
                    self.block = Some(Block::Quote(lines));
                    return Ok(());
                }
                self.quote(&lines)?;
            }
            Some(Block::Table { header }) => {
                if table::is_row(trimmed) {
                    return self.table_row(trimmed, header);
                }
                if let Some(header) = header {
                    self.open_table(&header, &[])?;
                }
                self.emit("|===")?;
            }
            None => {}
        }

        if references::is_definition(line) {
            return Ok(());
        }

        if let Some(title) = self.held.take() {
            if !trimmed.is_empty() && SETEXT_UNDERLINE.is_match(trimmed) {
                let marker = if trimmed.starts_with('=') { "=" } else { "==" };
                let title = inline::rewrite(title.trim(), self.references);
                return self.emit(&format!("{marker} {title}"));
            }
            self.paragraph(&title)?;
        }

        if index == 0 && trimmed == "---" {
            self.block = Some(Block::Frontmatter(Vec::new()));
            return Ok(());
        }

        if let Some(caps) = FENCE_OPEN.captures(line) {
            self.in_list = false;
            self.block = Some(Block::Fenced {
                language: caps[1].to_string(),
                lines: Vec::new(),
            });
            return Ok(());
        }

        if self.previous_blank && !self.in_list && !trimmed.is_empty() {
            if let Some(code) = line.strip_prefix("    ") {
                self.block = Some(Block::Indented(vec![code.to_string()]));
                return Ok(());
            }
        }

        if trimmed.starts_with('<') && self.html_start(line, trimmed)? {
            self.in_list = false;
            return Ok(());
        }

        if trimmed.is_empty() {
            return self.emit("");
        }

        if let Some(caps) = ATX_HEADING.captures(line) {
            self.in_list = false;
            let marker = "=".repeat(caps[1].len());
            let title = inline::rewrite(caps[2].trim(), self.references);
            return self.emit(&format!("{marker} {title}"));
        }

        if HORIZONTAL_RULE.is_match(trimmed) {
            self.in_list = false;
            return self.emit("'''");
        }

        if let Some(caps) = BLOCKQUOTE.captures(line) {
            self.in_list = false;
            self.block = Some(Block::Quote(vec![caps[1].to_string()]));
            return Ok(());
        }

        if table::is_row(trimmed) {
            self.in_list = false;
            self.block = Some(Block::Table {
                header: Some(table::cells(trimmed)),
            });
            return Ok(());
        }

        if let Some(caps) = TASK_ITEM.captures(line) {
            self.in_list = true;
            let checkbox = if caps[2].eq_ignore_ascii_case("x") { "[x]" } else { "[ ]" };
            let text = inline::rewrite(&caps[3], self.references);
            return self.emit(&format!("{}* {checkbox} {text}", indent(&caps[1])));
        }

        if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.in_list = true;
            let text = inline::rewrite(&caps[2], self.references);
            return self.emit(&format!("{}. {text}", indent(&caps[1])));
        }

        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            self.in_list = true;
            let text = inline::rewrite(&caps[2], self.references);
            return self.emit(&format!("{}* {text}", indent(&caps[1])));
        }

        if let Some(caps) = STANDALONE_REFERENCE_IMAGE.captures(trimmed) {
            let label = if caps[2].trim().is_empty() { &caps[1] } else { &caps[2] };
            if let Some(reference) = self.references.get(label) {
                let image = format!("image::{}[{}]", reference.url, &caps[1]);
                return self.emit(&image);
            }
        }

        if !line.starts_with(' ') {
            self.in_list = false;
        }
        self.held = Some(line.to_string());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(line) = self.held.take() {
            self.paragraph(&line)?;
        }
        match self.block.take() {
            Some(Block::Frontmatter(lines)) => {
                log::debug!("frontmatter was never closed; converting it anyway");
                for header in frontmatter::header_lines(&lines) {
                    self.emit(&header)?;
                }
            }
            Some(Block::Fenced { language, lines }) => {
                log::debug!("unterminated code fence runs to end of input");
                self.code_block(&language, &lines)?;
            }
            Some(Block::Indented(mut lines)) => {
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                self.code_block("", &lines)?;
            }
            Some(Block::Html { lines, .. }) => self.html_block(&lines)?,
            Some(Block::Quote(lines)) => self.quote(&lines)?,
            Some(Block::Table { header }) => {
                if let Some(header) = header {
                    self.open_table(&header, &[])?;
                }
                self.emit("|===")?;
            }
            None => {}
        }
        self.out.flush()
    }

    fn paragraph(&mut self, line: &str) -> io::Result<()> {
        let converted = inline::rewrite(line, self.references);
        if line.ends_with("  ") && !line.trim().is_empty() {
            self.emit(&format!("{} +", converted.trim_end()))
        } else {
            self.emit(&converted)
        }
    }

    fn code_block(&mut self, language: &str, lines: &[String]) -> io::Result<()> {
        if !language.is_empty() {
            self.emit(&format!("[source,{language}]"))?;
        }
        self.emit("----")?;
        for line in lines {
            self.emit(line)?;
        }
        self.emit("----")
    }

    fn html_block(&mut self, lines: &[String]) -> io::Result<()> {
        self.emit(HTML_BLOCK_NOTE)?;
        self.passthrough(lines)
    }

    fn passthrough(&mut self, lines: &[String]) -> io::Result<()> {
        self.emit("++++")?;
        for line in lines {
            self.emit(line)?;
        }
        self.emit("++++")
    }

    /// Handles a line starting with `<`. Returns false when it is not block HTML.
    fn html_start(&mut self, line: &str, trimmed: &str) -> io::Result<bool> {
        if HTML_COMMENT.is_match(trimmed) {
            self.emit(HTML_COMMENT_NOTE)?;
            self.passthrough(&[line.to_string()])?;
            return Ok(true);
        }
        if HTML_SELF_CLOSING.is_match(trimmed) {
            self.html_block(&[line.to_string()])?;
            return Ok(true);
        }
        let Some(caps) = HTML_OPEN.captures(trimmed) else {
            return Ok(false);
        };
        let tag = caps[1].to_ascii_lowercase();
        if !BLOCK_TAGS.contains(&tag.as_str()) {
            return Ok(false);
        }
        let lines = vec![line.to_string()];
        if closes(trimmed, &tag) || tag == "hr" {
            self.html_block(&lines)?;
        } else {
            self.block = Some(Block::Html { tag, lines });
        }
        Ok(true)
    }

    fn quote(&mut self, lines: &[String]) -> io::Result<()> {
        let mut body: Vec<String> = lines.to_vec();
        let kind = body.first().and_then(|first| {
            let caps = BOLD_ADMONITION
                .captures(first)
                .or_else(|| ALERT_ADMONITION.captures(first))?;
            let kind = admonition(&caps[1].to_ascii_uppercase())?;
            let rest = first[caps[0].len()..].trim().to_string();
            Some((kind, rest))
        });

        if let Some((kind, rest)) = kind {
            if rest.is_empty() {
                body.remove(0);
            } else {
                body[0] = rest;
            }
            while body.first().is_some_and(|l| l.trim().is_empty()) {
                body.remove(0);
            }
            let converted: Vec<String> =
                body.iter().map(|l| inline::rewrite(l, self.references)).collect();
            if converted.len() <= 1 {
                let text = converted.first().map(String::as_str).unwrap_or_default();
                return self.emit(&format!("{kind}: {text}"));
            }
            self.emit(&format!("[{kind}]"))?;
            self.emit("====")?;
            for line in &converted {
                self.emit(line)?;
            }
            return self.emit("====");
        }

        self.emit("[quote]")?;
        self.emit("____")?;
        for line in &body {
            let converted = inline::rewrite(line, self.references);
            self.emit(&converted)?;
        }
        self.emit("____")
    }

    fn table_row(&mut self, row: &str, header: Option<Vec<String>>) -> io::Result<()> {
        match header {
            Some(header) if table::is_separator(row) => {
                self.open_table(&header, &table::alignments(row))?;
            }
            Some(header) => {
                self.open_table(&header, &[])?;
                self.write_row(&table::cells(row))?;
            }
            None => self.write_row(&table::cells(row))?,
        }
        self.block = Some(Block::Table { header: None });
        Ok(())
    }

    fn open_table(&mut self, header: &[String], alignments: &[Align]) -> io::Result<()> {
        let cols = table::column_spec(header.len(), alignments);
        self.emit(&format!("[cols=\"{cols}\"]"))?;
        self.emit("|===")?;
        self.write_row(header)
    }

    fn write_row(&mut self, cells: &[String]) -> io::Result<()> {
        let converted: Vec<String> = cells
            .iter()
            .map(|cell| {
                let text = inline::rewrite(cell, self.references);
                text.replace('|', "\\|")
            })
            .collect();
        self.emit(&format!("|{}", converted.join(" |")))
    }
}

fn closes(line: &str, tag: &str) -> bool {
    HTML_CLOSE
        .captures(line)
        .is_some_and(|caps| caps[1].eq_ignore_ascii_case(tag))
}

fn indent(leading: &str) -> String {
    " ".repeat(leading.chars().filter(|c| *c == ' ').count())
}

/// AsciiDoc admonition label for a Markdown callout label, if it is one.
fn admonition(label: &str) -> Option<&'static str> {
    match label {
        "INFO" => Some("NOTE"),
        "DANGER" => Some("CAUTION"),
        other => ADMONITIONS.iter().find(|known| **known == other).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(markdown: &str) -> String {
        let lines: Vec<&str> = markdown.lines().collect();
        let references = References::collect(lines.iter().copied());
        let out = Transcoder::new(&references, Vec::new()).run(&lines).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn headings_and_lists() {
        assert_eq!(convert("# H\n\n- a\n- b"), "= H\n\n* a\n* b\n");
        assert_eq!(convert("### Deep ###"), "=== Deep\n");
        assert_eq!(convert("1. one\n  2) two"), ". one\n  . two\n");
    }

    #[test]
    fn setext_headings_replace_their_title_line() {
        assert_eq!(convert("Title\n=====\n\nSub\n---\nbody"), "= Title\n\n== Sub\nbody\n");
    }

    #[test]
    fn rule_after_blank_line_is_not_a_heading() {
        assert_eq!(convert("text\n\n---\nmore"), "text\n\n'''\nmore\n");
    }

    #[test]
    fn fenced_code_is_verbatim() {
        assert_eq!(
            convert("```rust\nlet x = *a*;\n```\n"),
            "[source,rust]\n----\nlet x = *a*;\n----\n"
        );
        assert_eq!(convert("```\nplain\n```"), "----\nplain\n----\n");
    }

    #[test]
    fn unterminated_fence_keeps_its_content() {
        assert_eq!(convert("```\nline"), "----\nline\n----\n");
    }

    #[test]
    fn indented_code_needs_a_blank_line_before() {
        assert_eq!(
            convert("Intro\n\n    code\n\n    more\nAfter"),
            "Intro\n\n----\ncode\n\nmore\n----\nAfter\n"
        );
        assert_eq!(convert("- item\n    - nested"), "* item\n    * nested\n");
    }

    #[test]
    fn html_blocks_are_passed_through() {
        assert_eq!(
            convert("<div class=\"x\">\n*raw*\n</div>\nafter"),
            format!("{HTML_BLOCK_NOTE}\n++++\n<div class=\"x\">\n*raw*\n</div>\n++++\nafter\n")
        );
        assert_eq!(
            convert("<!-- note -->"),
            format!("{HTML_COMMENT_NOTE}\n++++\n<!-- note -->\n++++\n")
        );
        assert_eq!(
            convert("<p>one line</p>"),
            format!("{HTML_BLOCK_NOTE}\n++++\n<p>one line</p>\n++++\n")
        );
    }

    #[test]
    fn frontmatter_becomes_header() {
        assert_eq!(
            convert("---\ntitle: Post\ntags:\n  - a\n  - b\n---\n\n# Content"),
            "= Post\n:tags: a, b\n\n= Content\n"
        );
    }

    #[test]
    fn rule_after_first_line_is_not_frontmatter() {
        assert_eq!(convert("Intro\n\n---"), "Intro\n\n'''\n");
    }

    #[test]
    fn blockquotes() {
        assert_eq!(convert("> wise\n> words"), "[quote]\n____\nwise\nwords\n____\n");
        assert_eq!(convert("> **Note** check *this*"), "NOTE: check _this_\n");
        assert_eq!(
            convert("> **Bold** claim"),
            "[quote]\n____\n**Bold** claim\n____\n"
        );
        assert_eq!(
            convert("> [!WARNING]\n> one\n> two"),
            "[WARNING]\n====\none\ntwo\n====\n"
        );
    }

    #[test]
    fn tables_take_alignment_from_separator() {
        assert_eq!(
            convert("| A | B |\n|:--|--:|\n| **x** | y |\n\nafter"),
            "[cols=\"<1,>1\"]\n|===\n|A |B\n|**x** |y\n|===\n\nafter\n"
        );
    }

    #[test]
    fn table_without_separator() {
        assert_eq!(convert("| a | b |"), "[cols=\"1,1\"]\n|===\n|a |b\n|===\n");
    }

    #[test]
    fn task_lists() {
        assert_eq!(convert("- [x] done\n- [ ] todo"), "* [x] done\n* [ ] todo\n");
    }

    #[test]
    fn reference_definitions_are_dropped() {
        assert_eq!(
            convert("See [docs][].\n\n[docs]: https://x.io\n![Logo][l]\n\n[l]: /l.png"),
            "See link:https://x.io[docs].\n\nimage::/l.png[Logo]\n\n"
        );
    }

    #[test]
    fn hard_line_breaks() {
        assert_eq!(convert("one  \ntwo"), "one +\ntwo\n");
    }
}
