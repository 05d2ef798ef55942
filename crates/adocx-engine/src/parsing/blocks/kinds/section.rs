use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(={1,6})\s+(\S.*?)\s*$").expect("Invalid section regex"));

/// A section heading line such as `== Title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    /// Number of `=` minus one: `=` is 0 (document title), `==` is 1.
    pub level: usize,
    pub title: String,
}

impl SectionHeading {
    /// Block styles that are not ids when written as `[name]` above a heading.
    pub const STYLES: [&'static str; 12] = [
        "appendix",
        "discrete",
        "float",
        "glossary",
        "bibliography",
        "preface",
        "abstract",
        "index",
        "colophon",
        "dedication",
        "partintro",
        "sect",
    ];

    pub fn parse(line: &str) -> Option<SectionHeading> {
        let caps = HEADING.captures(line.trim_end())?;
        Some(SectionHeading {
            level: caps[1].len() - 1,
            title: caps[2].to_string(),
        })
    }

    pub fn is_style(name: &str) -> bool {
        Self::STYLES.contains(&name)
    }

    /// Headings rendered in place without owning the content that follows them.
    pub fn is_discrete(style: Option<&str>) -> bool {
        matches!(style, Some("discrete" | "float"))
    }
}

/// Derives an id from a section title: lowercase, spaces to `_`, anything outside
/// `[a-z0-9_]` dropped.
pub fn generate_id(title: &str) -> String {
    let id: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();
    if id.is_empty() {
        "section".to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("= Title", 0, "Title")]
    #[case("== Section One", 1, "Section One")]
    #[case("===== Deep  ", 4, "Deep")]
    fn parses_headings(#[case] line: &str, #[case] level: usize, #[case] title: &str) {
        let heading = SectionHeading::parse(line).unwrap();
        assert_eq!(heading.level, level);
        assert_eq!(heading.title, title);
    }

    #[rstest]
    #[case("====")]
    #[case("==NoSpace")]
    #[case("======= Too deep")]
    #[case("text == not a heading")]
    fn rejects_non_headings(#[case] line: &str) {
        assert_eq!(SectionHeading::parse(line), None);
    }

    #[rstest]
    #[case("Getting Started", "getting_started")]
    #[case("What's New in 2.0?", "whats_new_in_20")]
    #[case("Über Café", "ber_caf")]
    #[case("???", "section")]
    fn generates_ids(#[case] title: &str, #[case] id: &str) {
        assert_eq!(generate_id(title), id);
    }

    #[test]
    fn styles_are_not_ids() {
        assert!(SectionHeading::is_style("appendix"));
        assert!(!SectionHeading::is_style("intro"));
        assert!(SectionHeading::is_discrete(Some("discrete")));
        assert!(!SectionHeading::is_discrete(None));
    }
}
