/// A parsed bracketed attribute list such as `source,rust` or `text, window="_blank"`.
///
/// Entries are split on commas outside quotes. An entry of the form `key=value` with an
/// identifier-like key is named; everything else is positional. Surrounding quotes are
/// stripped from values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList {
    pub positional: Vec<String>,
    pub named: Vec<(String, String)>,
}

impl AttrList {
    pub fn parse(raw: &str) -> Self {
        let mut list = AttrList::default();
        if raw.trim().is_empty() {
            return list;
        }
        for part in split_attributes(raw) {
            let part = part.trim();
            match part.split_once('=') {
                Some((key, value)) if is_name(key.trim()) => {
                    list.named
                        .push((key.trim().to_string(), unquote(value.trim()).to_string()));
                }
                _ => list.positional.push(unquote(part).to_string()),
            }
        }
        list
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Last value for `key`, so repeated keys behave as last-write-wins.
    pub fn named(&self, key: &str) -> Option<&str> {
        self.named
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Splits on commas that are not inside single or double quotes.
pub fn split_attributes(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut prev = '\0';

    for c in raw.chars() {
        match c {
            '"' | '\'' if prev != '\\' => {
                match quote {
                    None => quote = Some(c),
                    Some(open) if open == c => quote = None,
                    Some(_) => {}
                }
                current.push(c);
            }
            ',' if quote.is_none() => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
        prev = c;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn is_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
