use std::sync::LazyLock;

use regex::Regex;

static LISTING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{4,}$").expect("Invalid listing delimiter regex"));
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(`{3,})\s*([\w+#.\-]*)\s*$").expect("Invalid fence delimiter regex")
});
static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.{4,}$").expect("Invalid literal delimiter regex"));
static PASSTHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+{4,}$").expect("Invalid passthrough delimiter regex"));
static EXAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^={4,}$").expect("Invalid example delimiter regex"));
static SIDEBAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*{4,}$").expect("Invalid sidebar delimiter regex"));
static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_{4,}$").expect("Invalid quote delimiter regex"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/{4,}$").expect("Invalid comment delimiter regex"));
static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|={3,}$").expect("Invalid table delimiter regex"));

/// Delimited block families, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDelimiter {
    /// `----`
    Listing,
    /// ```` ``` ```` with an optional language
    Fenced,
    /// `....`
    Literal,
    /// `++++`
    Passthrough,
    /// `====`
    Example,
    /// `****`
    Sidebar,
    /// `____`
    Quote,
    /// `--`
    Open,
    /// `|===`
    Table,
    /// `////`
    Comment,
}

/// An opening delimiter line.
///
/// A block closes on a line identical to its opener, so `-----` inside a `----` block is
/// content rather than a terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    pub kind: BlockDelimiter,
    pub marker: String,
    /// Language named after a fenced opener (```` ```rust ````).
    pub language: Option<String>,
}

impl Delimiter {
    pub const OPEN: &'static str = "--";

    /// Recognizes an opening delimiter. The whole (trimmed) line must be the delimiter.
    pub fn detect(line: &str) -> Option<Delimiter> {
        let line = line.trim();
        if let Some(caps) = FENCE.captures(line) {
            return Some(Delimiter {
                kind: BlockDelimiter::Fenced,
                marker: caps[1].to_string(),
                language: Some(caps[2].to_string()).filter(|lang| !lang.is_empty()),
            });
        }
        let kind = if LISTING.is_match(line) {
            BlockDelimiter::Listing
        } else if LITERAL.is_match(line) {
            BlockDelimiter::Literal
        } else if PASSTHROUGH.is_match(line) {
            BlockDelimiter::Passthrough
        } else if EXAMPLE.is_match(line) {
            BlockDelimiter::Example
        } else if SIDEBAR.is_match(line) {
            BlockDelimiter::Sidebar
        } else if QUOTE.is_match(line) {
            BlockDelimiter::Quote
        } else if line == Self::OPEN {
            BlockDelimiter::Open
        } else if TABLE.is_match(line) {
            BlockDelimiter::Table
        } else if COMMENT.is_match(line) {
            BlockDelimiter::Comment
        } else {
            return None;
        };
        Some(Delimiter {
            kind,
            marker: line.to_string(),
            language: None,
        })
    }

    pub fn closes(&self, line: &str) -> bool {
        let line = line.trim();
        match self.kind {
            BlockDelimiter::Table => TABLE.is_match(line),
            _ => line == self.marker,
        }
    }

    /// Index of the closing line in `lines`, or `None` when the block runs to the end.
    pub fn find_close(&self, lines: &[&str]) -> Option<usize> {
        lines.iter().position(|line| self.closes(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("----", BlockDelimiter::Listing)]
    #[case("------", BlockDelimiter::Listing)]
    #[case("```", BlockDelimiter::Fenced)]
    #[case("....", BlockDelimiter::Literal)]
    #[case("++++", BlockDelimiter::Passthrough)]
    #[case("====", BlockDelimiter::Example)]
    #[case("****", BlockDelimiter::Sidebar)]
    #[case("____", BlockDelimiter::Quote)]
    #[case("--", BlockDelimiter::Open)]
    #[case("|===", BlockDelimiter::Table)]
    #[case("////", BlockDelimiter::Comment)]
    fn detects_delimiters(#[case] line: &str, #[case] kind: BlockDelimiter) {
        assert_eq!(Delimiter::detect(line).map(|d| d.kind), Some(kind));
    }

    #[rstest]
    #[case("---")]
    #[case("==== Heading")]
    #[case("---- trailing")]
    #[case("- item")]
    #[case("**bold**")]
    fn rejects_partial_lines(#[case] line: &str) {
        assert_eq!(Delimiter::detect(line), None);
    }

    #[test]
    fn fence_language() {
        let fence = Delimiter::detect("```rust").unwrap();
        assert_eq!(fence.language.as_deref(), Some("rust"));
        assert!(fence.closes("```"));
        assert!(!fence.closes("```rust"));
    }

    #[test]
    fn closes_on_identical_marker_only() {
        let listing = Delimiter::detect("----").unwrap();
        assert!(!listing.closes("-----"));
        assert!(listing.closes("----  "));
        let lines = ["code", "-----", "----", "after"];
        assert_eq!(listing.find_close(&lines), Some(2));
        assert_eq!(listing.find_close(&lines[..2]), None);
    }
}
