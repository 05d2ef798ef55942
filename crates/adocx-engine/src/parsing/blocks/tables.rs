use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{Node, NodeKind};
use crate::parsing::attrlist::AttrList;

use super::kinds::BlockMeta;
use super::parser::BlockParser;

static CELL_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\+)?([<^>])?(?:\.([<^>]))?([adehlmsv])?$")
        .expect("Invalid cell specifier regex")
});
static COLUMN_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\*)?([<^>])?(?:\.([<^>]))?(?:\d+%?|~)?([adehlmsv])?$")
        .expect("Invalid column specifier regex")
});
static CELL_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\]#(.*)#$").expect("Invalid cell wrapper regex")
});

fn horizontal(symbol: &str) -> &'static str {
    match symbol {
        "^" => "center",
        ">" => "right",
        _ => "left",
    }
}

fn vertical(symbol: &str) -> &'static str {
    match symbol {
        "^" => "middle",
        ">" => "bottom",
        _ => "top",
    }
}

fn cell_style(letter: &str) -> &'static str {
    match letter {
        "a" => "asciidoc",
        "e" => "emphasis",
        "h" => "header",
        "l" => "literal",
        "m" => "monospace",
        "s" => "strong",
        "v" => "verse",
        _ => "default",
    }
}

/// Prefix written before a cell's `|`: `2+^.>s` spans two columns, centres, bottom-aligns
/// and applies the strong style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CellSpec {
    colspan: usize,
    align: Option<&'static str>,
    valign: Option<&'static str>,
    style: Option<&'static str>,
}

impl CellSpec {
    fn parse(spec: &str) -> Option<CellSpec> {
        let caps = CELL_SPEC.captures(spec)?;
        Some(CellSpec {
            colspan: caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(1),
            align: caps.get(2).map(|m| horizontal(m.as_str())),
            valign: caps.get(3).map(|m| vertical(m.as_str())),
            style: caps.get(4).map(|m| cell_style(m.as_str())),
        })
    }

    /// A non-empty specifier token.
    fn token(token: &str) -> Option<CellSpec> {
        if token.is_empty() {
            None
        } else {
            CellSpec::parse(token)
        }
    }

    fn span(&self) -> usize {
        self.colspan.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawCell {
    spec: CellSpec,
    text: String,
}

/// Horizontal alignment per column from a `cols` value. `"3"` means three columns;
/// `"1,2*^"` means three columns, the last two centred.
fn column_alignments(cols: &str) -> Vec<Option<&'static str>> {
    let cols = cols.trim();
    if cols.is_empty() {
        return Vec::new();
    }
    if !cols.contains(',') {
        if let Ok(count) = cols.parse::<usize>() {
            return vec![None; count];
        }
    }
    let mut alignments = Vec::new();
    for part in cols.split(',').map(str::trim) {
        match COLUMN_SPEC.captures(part) {
            Some(caps) => {
                let repeat = caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(1);
                let align = caps.get(2).map(|m| horizontal(m.as_str()));
                alignments.extend(std::iter::repeat_n(align, repeat));
            }
            None => alignments.push(None),
        }
    }
    alignments
}

/// Splits a row line on `|`, keeping `\|` as a literal bar.
fn split_bars(line: &str) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                if let Some(segment) = segments.last_mut() {
                    segment.push('|');
                }
            }
            '|' => segments.push(String::new()),
            _ => {
                if let Some(segment) = segments.last_mut() {
                    segment.push(c);
                }
            }
        }
    }
    segments
}

/// Reads the cells of a table body in source order, along with the number of cells on
/// the first line that holds any.
fn read_cells(lines: &[&str]) -> (Vec<RawCell>, Option<usize>) {
    let mut cells: Vec<RawCell> = Vec::new();
    let mut first_line_cells = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let segments = split_bars(trimmed);
        let lead = segments[0].trim();
        let mut spec = CellSpec::default();
        if !lead.is_empty() {
            match CellSpec::parse(lead).filter(|_| segments.len() > 1) {
                Some(parsed) => spec = parsed,
                None => {
                    if let Some(last) = cells.last_mut() {
                        if !last.text.is_empty() {
                            last.text.push(' ');
                        }
                        last.text.push_str(lead);
                    }
                }
            }
        }

        let count = segments.len() - 1;
        let mut line_cells = 0;
        for (k, segment) in segments.iter().enumerate().skip(1) {
            let is_last = k == count;
            let mut text = segment.as_str();
            let mut next = CellSpec::default();
            if !is_last && text == text.trim_end() {
                if let Some((head, token)) = text.rsplit_once(char::is_whitespace) {
                    if let Some(parsed) = CellSpec::token(token) {
                        text = head;
                        next = parsed;
                    }
                }
            }
            let text = text.trim();
            if is_last && text.is_empty() && count > 1 {
                break;
            }
            cells.push(RawCell {
                spec: std::mem::replace(&mut spec, next),
                text: text.to_string(),
            });
            line_cells += 1;
        }
        if line_cells > 0 && first_line_cells.is_none() {
            first_line_cells = Some(line_cells);
        }
    }
    (cells, first_line_cells)
}

/// Groups cells into rows of `columns` width, counting column spans.
fn chunk_rows(cells: Vec<RawCell>, columns: usize) -> Vec<Vec<RawCell>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut width = 0;
    for cell in cells {
        width += cell.spec.span();
        row.push(cell);
        if width >= columns {
            rows.push(std::mem::take(&mut row));
            width = 0;
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Splits `[.role]#text#` or `[key=value]#text#` into its attributes and text.
fn unwrap_cell(text: &str) -> (Vec<(String, String)>, &str) {
    let Some(caps) = CELL_WRAPPER.captures(text) else {
        return (Vec::new(), text);
    };
    let inner = caps.get(2).map_or("", |m| m.as_str());
    let raw = caps.get(1).map_or("", |m| m.as_str()).trim();
    let attributes = match raw.strip_prefix('.') {
        Some(roles) => {
            let roles: Vec<&str> = roles.split('.').filter(|role| !role.is_empty()).collect();
            vec![("role".to_string(), roles.join(" "))]
        }
        None => AttrList::parse(raw).named,
    };
    (attributes, inner)
}

impl<'a, 'c> BlockParser<'a, 'c> {
    /// Builds a `Table` from the lines between `|===` delimiters.
    pub(super) fn table(&mut self, body: &[&str], meta: &BlockMeta, table_path: &[usize]) -> Node {
        let mut table = Node::new(NodeKind::Table);
        let alignments = meta.named("cols").map(column_alignments).unwrap_or_default();
        if let Some(cols) = meta.named("cols") {
            table.set_attribute("cols", cols);
        }
        if !meta.options.is_empty() {
            table.set_attribute("options", meta.options.join(","));
        }
        let header = !meta.has_option("noheader");

        let (cells, first_line_cells) = read_cells(body);
        let columns = if alignments.is_empty() {
            first_line_cells.unwrap_or(1).max(1)
        } else {
            alignments.len()
        };

        for (r, row) in chunk_rows(cells, columns).into_iter().enumerate() {
            let mut row_path = table_path.to_vec();
            row_path.push(r);
            let mut row_node = Node::new(NodeKind::TableRow);
            if r == 0 && header {
                row_node.set_attribute("role", "header");
            }

            let mut column = 0;
            for (c, cell) in row.into_iter().enumerate() {
                let mut cell_path = row_path.clone();
                cell_path.push(c);
                let mut node = Node::new(NodeKind::TableCell);
                let (attributes, text) = unwrap_cell(&cell.text);
                for (key, value) in attributes {
                    node.set_attribute(key, value);
                }
                let align = cell
                    .spec
                    .align
                    .or_else(|| alignments.get(column).copied().flatten());
                if let Some(align) = align {
                    node.set_attribute("align", align);
                }
                if let Some(valign) = cell.spec.valign {
                    node.set_attribute("valign", valign);
                }
                if let Some(style) = cell.spec.style {
                    node.set_attribute("style", style);
                }
                if cell.spec.span() > 1 {
                    node.set_attribute("colspan", cell.spec.span().to_string());
                }
                node.children = self.inline(text, &cell_path, 0);
                column += cell.spec.span();
                row_node.add_child(node);
            }
            table.add_child(row_node);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{AttributeTable, ParseContext};

    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Node {
        let lines: Vec<&str> = text.lines().collect();
        let mut ctx = ParseContext::new();
        let mut root = Node::document();
        BlockParser::new(&lines, AttributeTable::new(), &mut ctx).parse_into(&mut root, &[], None);
        root.children.into_iter().next().unwrap()
    }

    fn texts(table: &Node) -> Vec<Vec<String>> {
        table
            .children
            .iter()
            .map(|row| row.children.iter().map(Node::text_content).collect())
            .collect()
    }

    #[test]
    fn rows_from_lines() {
        let table = parse("|===\n|H1|H2\n|c1|c2\n|===");
        assert_eq!(table.kind, NodeKind::Table);
        assert_eq!(texts(&table), vec![vec!["H1", "H2"], vec!["c1", "c2"]]);
        assert_eq!(table.children[0].attribute("role"), Some("header"));
        assert_eq!(table.children[1].attribute("role"), None);
    }

    #[test]
    fn one_cell_per_line_with_cols() {
        let table = parse("[cols=\"1,1\"]\n|===\n|a\n|b\n\n|c\n|d\n|===");
        assert_eq!(texts(&table), vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!(table.attribute("cols"), Some("1,1"));
    }

    #[test]
    fn noheader_option() {
        let table = parse("[%noheader]\n|===\n|a|b\n|===");
        assert_eq!(table.children[0].attribute("role"), None);
        assert_eq!(table.attribute("options"), Some("noheader"));
    }

    #[test]
    fn cell_specifiers() {
        let table = parse("|===\n|A|B|C\n2+^|wide .>s|strong\n|===");
        let row = &table.children[1];
        assert_eq!(row.children.len(), 2);
        assert_eq!(row.children[0].attribute("colspan"), Some("2"));
        assert_eq!(row.children[0].attribute("align"), Some("center"));
        assert_eq!(row.children[0].text_content(), "wide");
        assert_eq!(row.children[1].attribute("valign"), Some("bottom"));
        assert_eq!(row.children[1].attribute("style"), Some("strong"));
    }

    #[test]
    fn column_alignment_applies_to_cells() {
        let table = parse("[cols=\"<,2*>\"]\n|===\n|a|b|c\n|===");
        let cells = &table.children[0].children;
        assert_eq!(cells[0].attribute("align"), Some("left"));
        assert_eq!(cells[2].attribute("align"), Some("right"));
    }

    #[test]
    fn escaped_bar_and_continuation() {
        let table = parse("|===\n|a \\| b|second\nmore text\n|===");
        assert_eq!(texts(&table), vec![vec!["a | b", "second more text"]]);
    }

    #[test]
    fn trailing_bar_is_dropped() {
        let table = parse("|===\n|a|b|\n|===");
        assert_eq!(texts(&table), vec![vec!["a", "b"]]);
    }

    #[test]
    fn cell_roles_and_inline_markup() {
        let table = parse("|===\n|[.warn]#*Careful*#|plain\n|===");
        let cell = &table.children[0].children[0];
        assert_eq!(cell.attribute("role"), Some("warn"));
        assert_eq!(cell.children[0].kind, NodeKind::Bold);
    }

    #[test]
    fn column_specs() {
        assert_eq!(column_alignments("3"), vec![None, None, None]);
        assert_eq!(
            column_alignments("1,2*^"),
            vec![None, Some("center"), Some("center")]
        );
        assert_eq!(column_alignments("30%,~"), vec![None, None]);
    }
}
