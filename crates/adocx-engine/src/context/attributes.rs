use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ast::DEFAULT_DOCTYPE;

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\w\-_]+)\}").expect("Invalid attribute reference regex"));

/// Names promoted to first-class fields of the table.
pub const BUILT_IN: [&str; 7] = [
    "title",
    "author",
    "email",
    "revnumber",
    "revdate",
    "revremark",
    "doctype",
];

/// Document-scope attribute values.
///
/// The built-in names get their own fields; every other name is kept in `custom`.
/// Assignments are last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
    title: Option<String>,
    author: Option<String>,
    email: Option<String>,
    revnumber: Option<String>,
    revdate: Option<String>,
    revremark: Option<String>,
    doctype: Option<String>,
    custom: BTreeMap<String, String>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn built_in_slot(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "title" => Some(&mut self.title),
            "author" => Some(&mut self.author),
            "email" => Some(&mut self.email),
            "revnumber" => Some(&mut self.revnumber),
            "revdate" => Some(&mut self.revdate),
            "revremark" => Some(&mut self.revremark),
            "doctype" => Some(&mut self.doctype),
            _ => None,
        }
    }

    /// Resolves a built-in name, `None` for custom names or unset built-ins.
    pub fn built_in(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "title" => &self.title,
            "author" => &self.author,
            "email" => &self.email,
            "revnumber" => &self.revnumber,
            "revdate" => &self.revdate,
            "revremark" => &self.revremark,
            "doctype" => &self.doctype,
            _ => return None,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.built_in_slot(&name) {
            Some(slot) => *slot = Some(value),
            None => {
                self.custom.insert(name, value);
            }
        }
    }

    pub fn unset(&mut self, name: &str) {
        match self.built_in_slot(name) {
            Some(slot) => *slot = None,
            None => {
                self.custom.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        if BUILT_IN.contains(&name) {
            return self.built_in(name);
        }
        self.custom.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn revnumber(&self) -> Option<&str> {
        self.revnumber.as_deref()
    }

    pub fn revdate(&self) -> Option<&str> {
        self.revdate.as_deref()
    }

    pub fn revremark(&self) -> Option<&str> {
        self.revremark.as_deref()
    }

    pub fn doctype(&self) -> &str {
        self.doctype.as_deref().unwrap_or(DEFAULT_DOCTYPE)
    }

    /// All set attributes, built-ins first, then custom names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        BUILT_IN
            .iter()
            .filter_map(|name| self.built_in(name).map(|value| (*name, value)))
            .chain(
                self.custom
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
    }

    /// Replaces every `{name}` reference in `text` in a single pass.
    ///
    /// Unknown names become the empty string. Substituted values are not rescanned.
    pub fn substitute<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.contains('{') {
            return Cow::Borrowed(text);
        }
        REFERENCE.replace_all(text, |caps: &Captures| {
            self.get(&caps[1]).unwrap_or_default().to_string()
        })
    }

    /// Returns a new table holding `self` overlaid with `overrides`.
    pub fn merge(&self, overrides: &AttributeTable) -> AttributeTable {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.set(name, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = AttributeTable::new();
        for (name, value) in iter {
            table.set(name, value);
        }
        table
    }
}

/// Free-function form of [`AttributeTable::substitute`].
pub fn substitute<'t>(text: &'t str, table: &AttributeTable) -> Cow<'t, str> {
    table.substitute(text)
}
