use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]:\s*(.+)$").expect("Invalid reference definition regex")
});

static DESTINATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<?([^>\s]+)>?").expect("Invalid reference URL regex"));

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]+)"|'([^']+)'|\(([^)]+)\)"#).expect("Invalid reference title regex")
});

/// Target of a `[label]: url "title"` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub url: String,
    pub title: Option<String>,
}

/// Link reference definitions keyed by lowercased label.
#[derive(Debug, Clone, Default)]
pub struct References {
    entries: HashMap<String, LinkReference>,
}

impl References {
    /// Scans every line for definitions. A later definition of the same label replaces
    /// an earlier one.
    pub fn collect<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut references = Self::default();
        for line in lines {
            if let Some((label, reference)) = parse_definition(line.trim()) {
                references.entries.insert(label, reference);
            }
        }
        log::trace!("collected {} link reference definitions", references.entries.len());
        references
    }

    /// Looks `label` up case-insensitively.
    pub fn get(&self, label: &str) -> Option<&LinkReference> {
        self.entries.get(&normalize(label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `line` is a definition line, which the rewrite pass drops.
pub fn is_definition(line: &str) -> bool {
    DEFINITION.is_match(line.trim())
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

fn parse_definition(line: &str) -> Option<(String, LinkReference)> {
    let caps = DEFINITION.captures(line)?;
    let rest = caps[2].trim();
    let url = DESTINATION.captures(rest)?[1].to_string();
    let title = TITLE.captures(rest).and_then(|t| {
        t.iter()
            .skip(1)
            .flatten()
            .next()
            .map(|m| m.as_str().to_string())
    });
    Some((normalize(&caps[1]), LinkReference { url, title }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[home]: https://example.com", "https://example.com", None)]
    #[case("[home]: <https://example.com>", "https://example.com", None)]
    #[case("[home]: https://example.com \"Home\"", "https://example.com", Some("Home"))]
    #[case("[home]: https://example.com 'Home'", "https://example.com", Some("Home"))]
    #[case("[home]: <https://example.com> (Home)", "https://example.com", Some("Home"))]
    fn definition_forms(#[case] line: &str, #[case] url: &str, #[case] title: Option<&str>) {
        let refs = References::collect([line]);
        assert_eq!(
            refs.get("home"),
            Some(&LinkReference {
                url: url.to_string(),
                title: title.map(str::to_string),
            })
        );
    }

    #[test]
    fn labels_are_case_insensitive() {
        let refs = References::collect(["[Docs Site]: /docs", "text", "  [other]: /o"]);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs.get("docs site").map(|r| r.url.as_str()), Some("/docs"));
        assert_eq!(refs.get(" DOCS SITE ").map(|r| r.url.as_str()), Some("/docs"));
        assert!(refs.get("missing").is_none());
    }

    #[test]
    fn detects_definition_lines() {
        assert!(is_definition("[a]: /x"));
        assert!(!is_definition("[a](/x)"));
        assert!(!is_definition("plain"));
    }
}
