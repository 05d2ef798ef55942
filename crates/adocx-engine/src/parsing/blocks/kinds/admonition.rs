use std::sync::LazyLock;

use regex::Regex;

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(NOTE|TIP|IMPORTANT|WARNING|CAUTION):\s+(.*)$").expect("Invalid admonition regex")
});

/// Admonition labels (`NOTE: text`, or `[NOTE]` above a block).
pub struct Admonition;

impl Admonition {
    pub const LABELS: [&'static str; 5] = ["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

    /// Splits an admonition paragraph line into its lowercase type and text.
    pub fn detect(line: &str) -> Option<(String, String)> {
        let caps = PARAGRAPH.captures(line.trim())?;
        Some((caps[1].to_lowercase(), caps[2].trim().to_string()))
    }

    /// Lowercase type for a block style such as `NOTE`, `None` for other styles.
    pub fn from_style(style: &str) -> Option<String> {
        Self::LABELS
            .contains(&style)
            .then(|| style.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_labels() {
        assert_eq!(
            Admonition::detect("WARNING: Hot surface"),
            Some(("warning".to_string(), "Hot surface".to_string()))
        );
        assert_eq!(Admonition::detect("Note: lowercase is text"), None);
        assert_eq!(Admonition::detect("NOTE:missing space"), None);
    }

    #[test]
    fn block_styles() {
        assert_eq!(Admonition::from_style("TIP").as_deref(), Some("tip"));
        assert_eq!(Admonition::from_style("quote"), None);
    }
}
