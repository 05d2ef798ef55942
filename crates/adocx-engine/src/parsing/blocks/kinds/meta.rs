use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::attrlist::AttrList;

static ATTRIBUTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\[\]]*)\]$").expect("Invalid block attribute regex"));
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.([^.\s].*)$").expect("Invalid block title regex"));

/// Metadata lines collected above a block and applied to it.
///
/// `[style#id.role%option, positional..., name=value]` lines and `.Title` lines accumulate
/// until the next block consumes them. Later lines override the style and positional
/// values of earlier ones; roles, options and named values accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMeta {
    pub style: Option<String>,
    pub id: Option<String>,
    pub roles: Vec<String>,
    pub options: Vec<String>,
    /// Positional attributes after the style (`[source,rust]` → `["rust"]`).
    pub positional: Vec<String>,
    pub named: BTreeMap<String, String>,
    pub title: Option<String>,
}

impl BlockMeta {
    /// Inner text of a standalone `[...]` attribute line.
    pub fn attribute_line(line: &str) -> Option<&str> {
        ATTRIBUTE_LINE
            .captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Text of a `.Title` line.
    pub fn title_line(line: &str) -> Option<&str> {
        TITLE_LINE
            .captures(line.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }

    /// Folds one attribute line into the pending metadata.
    pub fn absorb(&mut self, raw: &str) {
        let list = AttrList::parse(raw);
        let mut positional = list.positional.into_iter();
        if let Some(first) = positional.next() {
            self.absorb_shorthand(first.trim());
        }
        let rest: Vec<String> = positional.map(|value| value.trim().to_string()).collect();
        if !rest.is_empty() {
            self.positional = rest;
        }
        for (key, value) in list.named {
            match key.as_str() {
                "id" => self.id = Some(value),
                "role" => self
                    .roles
                    .extend(value.split_whitespace().map(str::to_string)),
                "options" | "opts" => self.options.extend(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|option| !option.is_empty())
                        .map(str::to_string),
                ),
                _ => {
                    self.named.insert(key, value);
                }
            }
        }
    }

    /// `style#id.role1.role2%option` in the first positional slot.
    fn absorb_shorthand(&mut self, spec: &str) {
        let style_end = spec.find(['#', '.', '%']).unwrap_or(spec.len());
        if style_end > 0 {
            self.style = Some(spec[..style_end].to_string());
        }
        let mut rest = &spec[style_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[marker.len_utf8()..];
            let end = body.find(['#', '.', '%']).unwrap_or(body.len());
            let value = &body[..end];
            if !value.is_empty() {
                match marker {
                    '#' => self.id = Some(value.to_string()),
                    '.' => self.roles.push(value.to_string()),
                    _ => self.options.push(value.to_string()),
                }
            }
            rest = &body[end..];
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == BlockMeta::default()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn named(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Space-separated roles, `None` when there are none.
    pub fn role(&self) -> Option<String> {
        (!self.roles.is_empty()).then(|| self.roles.join(" "))
    }
}
