use std::sync::LazyLock;

use regex::Regex;

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:(!?)([A-Za-z0-9_][\w\-]*)(!?):(?:\s+(.*?))?\s*$")
        .expect("Invalid attribute entry regex")
});

/// A `:name: value` line, or `:name!:` / `:!name:` to unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    pub name: String,
    /// `None` unsets the attribute.
    pub value: Option<String>,
}

impl AttributeEntry {
    pub fn parse(line: &str) -> Option<AttributeEntry> {
        let caps = ENTRY.captures(line.trim())?;
        let unset = !caps[1].is_empty() || !caps[3].is_empty();
        let value = if unset {
            None
        } else {
            Some(caps.get(4).map_or("", |m| m.as_str()).to_string())
        };
        Some(AttributeEntry {
            name: caps[2].to_string(),
            value,
        })
    }
}
