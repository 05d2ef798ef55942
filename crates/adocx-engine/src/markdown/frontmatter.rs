use serde_yaml::Value;

/// Converts the lines between the `---` fences into AsciiDoc header lines.
///
/// `title` becomes the document title; every other key becomes an attribute entry.
/// Sequences are comma joined and nested mappings flatten to `parent-child` names.
/// Frontmatter that is not a YAML mapping falls back to a line-by-line `key: value` scan.
pub fn header_lines(lines: &[String]) -> Vec<String> {
    let source = lines.join("\n");
    if source.trim().is_empty() {
        return Vec::new();
    }
    match serde_yaml::from_str::<Value>(&source) {
        Ok(Value::Mapping(mapping)) => {
            let mut title = None;
            let mut entries = Vec::new();
            for (key, value) in &mapping {
                let Some(key) = scalar(key) else { continue };
                match scalar(value) {
                    Some(text) if key == "title" => title = Some(text),
                    _ => flatten(&key, value, &mut entries),
                }
            }
            assemble(title, entries)
        }
        Ok(Value::Null) => Vec::new(),
        Ok(_) => line_scan(lines),
        Err(err) => {
            log::debug!("frontmatter is not valid YAML, scanning lines instead: {err}");
            line_scan(lines)
        }
    }
}

fn assemble(title: Option<String>, entries: Vec<(String, String)>) -> Vec<String> {
    title
        .map(|title| format!("= {title}"))
        .into_iter()
        .chain(entries.into_iter().map(|(name, value)| entry(&name, &value)))
        .collect()
}

fn entry(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!(":{name}:")
    } else {
        format!(":{name}: {value}")
    }
}

fn flatten(name: &str, value: &Value, entries: &mut Vec<(String, String)>) {
    match value {
        Value::Mapping(mapping) => {
            for (key, nested) in mapping {
                if let Some(key) = scalar(key) {
                    flatten(&format!("{name}-{key}"), nested, entries);
                }
            }
        }
        Value::Sequence(items) => {
            let joined = items.iter().map(inline_value).collect::<Vec<_>>().join(", ");
            entries.push((name.to_string(), joined));
        }
        Value::Tagged(tagged) => flatten(name, &tagged.value, entries),
        other => entries.push((name.to_string(), scalar(other).unwrap_or_default())),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// Sequence items that are not scalars are written back as compact YAML.
fn inline_value(value: &Value) -> String {
    scalar(value).unwrap_or_else(|| {
        serde_yaml::to_string(value)
            .map(|yaml| yaml.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    })
}

fn line_scan(lines: &[String]) -> Vec<String> {
    let mut title = None;
    let mut entries = Vec::new();
    for line in lines {
        if line.starts_with([' ', '\t', '-', '#']) {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim().trim_matches(['"', '\'']).to_string();
        if key == "title" {
            title = Some(value);
        } else {
            entries.push((key.to_string(), value));
        }
    }
    assemble(title, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(yaml: &str) -> Vec<String> {
        header_lines(&yaml.lines().map(str::to_string).collect::<Vec<_>>())
    }

    #[test]
    fn title_and_scalars() {
        assert_eq!(
            convert("title: Test Post\ndraft: true\nweight: 3\nempty:"),
            vec!["= Test Post", ":draft: true", ":weight: 3", ":empty:"]
        );
    }

    #[test]
    fn sequences_are_joined() {
        assert_eq!(
            convert("title: T\ncategories:\n  - microsoft\n  - Windows\n  - windows server\ntags: [2012 R2, packer]"),
            vec![
                "= T",
                ":categories: microsoft, Windows, windows server",
                ":tags: 2012 R2, packer",
            ]
        );
    }

    #[test]
    fn nested_mappings_flatten() {
        assert_eq!(
            convert("author:\n  name: Jane\n  contact:\n    email: j@x.io"),
            vec![":author-name: Jane", ":author-contact-email: j@x.io"]
        );
    }

    #[test]
    fn invalid_yaml_falls_back_to_lines() {
        assert_eq!(
            convert("title: A: B: C\n  bad: [\nauthor: Jane"),
            vec!["= A: B: C", ":author: Jane"]
        );
    }

    #[test]
    fn empty_frontmatter() {
        assert!(convert("").is_empty());
    }
}
