use std::sync::LazyLock;

use regex::Regex;

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|(.+)\|$").expect("Invalid table row regex"));

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?[\s\-:]+\|[\s\-:]+\|?$").expect("Invalid table separator regex")
});

/// Column alignment from a GFM separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Default,
    Left,
    Center,
    Right,
}

impl Align {
    fn marker(self) -> &'static str {
        match self {
            Align::Default => "",
            Align::Left => "<",
            Align::Center => "^",
            Align::Right => ">",
        }
    }
}

pub fn is_row(line: &str) -> bool {
    ROW.is_match(line.trim_end())
}

pub fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line.trim_end())
}

/// Reads `:---`, `:---:` and `---:` cells.
pub fn alignments(separator: &str) -> Vec<Align> {
    separator
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(|cell| match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Align::Center,
            (false, true) => Align::Right,
            (true, false) => Align::Left,
            (false, false) => Align::Default,
        })
        .collect()
}

/// `cols` attribute value such as `<1,^1,>1`.
pub fn column_spec(columns: usize, alignments: &[Align]) -> String {
    (0..columns)
        .map(|i| {
            let align = alignments.get(i).copied().unwrap_or_default();
            format!("{}1", align.marker())
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Cell text of a row, without the outer pipes. `\|` stays inside its cell.
pub fn cells(row: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = row.trim().chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push_str("\\|");
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);
    if cells.first().is_some_and(|cell| cell.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", true)]
    #[case("|a|", true)]
    #[case("a | b", false)]
    fn detects_rows(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_row(line), expected);
    }

    #[rstest]
    #[case("|---|---|", true)]
    #[case("| :-- | --: |", true)]
    #[case("| a | b |", false)]
    fn detects_separators(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_separator(line), expected);
    }

    #[test]
    fn separator_alignments() {
        assert_eq!(
            alignments("| :--- | :---: | ---: | --- |"),
            vec![Align::Left, Align::Center, Align::Right, Align::Default]
        );
    }

    #[test]
    fn builds_column_spec() {
        assert_eq!(column_spec(3, &[]), "1,1,1");
        assert_eq!(column_spec(3, &[Align::Left, Align::Center]), "<1,^1,1");
    }

    #[test]
    fn splits_cells() {
        assert_eq!(cells("| a | b \\| c |  |"), vec!["a", "b \\| c", ""]);
        assert_eq!(cells("|x|y|"), vec!["x", "y"]);
    }
}
