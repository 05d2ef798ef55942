//! Inline Markdown to AsciiDoc rewriting.
//!
//! Rewrites run in a fixed order over one line of text. Generated macro targets, inline
//! HTML and code spans are swapped for placeholders as soon as they are produced so later
//! rewrites (italic `_`, autolinks) cannot touch them.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::references::References;

const ESCAPABLE: &str = "\\`*_{}[]()#+-.!|~<>";

const INLINE_TAGS: [&str; 26] = [
    "strong", "b", "em", "i", "code", "a", "img", "br", "span", "mark", "del", "ins", "sub",
    "sup", "small", "kbd", "samp", "var", "time", "abbr", "cite", "q", "dfn", "u", "bdi", "bdo",
];

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+`").expect("Invalid code span regex"));

static SELF_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-zA-Z][a-zA-Z0-9]*(?:\s[^>]*)?\s*/>").expect("Invalid self-closing tag regex")
});

static PAIRED_TAGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    INLINE_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"<{tag}(?:\s[^>]*)?>.*?</{tag}>"))
                .expect("Invalid inline tag regex")
        })
        .collect()
});

static REFERENCE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\[([^\]]*)\]").expect("Invalid reference image regex")
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("Invalid image regex"));

static TITLED_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(.+?)\s+["']([^"']+)["']$"#).expect("Invalid titled target regex")
});

static AUTOLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^<>\s]+)>").expect("Invalid autolink regex"));

static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\[([^\]]*)\]").expect("Invalid reference link regex")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex"));

static STRIKETHROUGH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~]+)~~").expect("Invalid strikethrough regex"));

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold regex"));

static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_]+)__").expect("Invalid bold regex"));

static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^*])\*([^*\n]+?)\*([^*]|$)").expect("Invalid italic regex")
});

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{OPEN}([0-9]+){CLOSE}")).expect("Invalid placeholder regex")
});

/// Text fragments pulled out of the line while the remaining rewrites run.
#[derive(Default)]
struct Shelf {
    slots: Vec<String>,
}

impl Shelf {
    fn store(&mut self, text: String) -> String {
        self.slots.push(text);
        format!("{OPEN}{}{CLOSE}", self.slots.len() - 1)
    }

    fn restore(&self, text: &str) -> String {
        let mut out = text.to_string();
        // Stored fragments may themselves hold placeholders.
        for _ in 0..=self.slots.len() {
            if !PLACEHOLDER.is_match(&out) {
                break;
            }
            out = PLACEHOLDER
                .replace_all(&out, |caps: &Captures| {
                    caps[1]
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| self.slots.get(i))
                        .cloned()
                        .unwrap_or_default()
                })
                .into_owned();
        }
        out
    }
}

/// Rewrites the inline Markdown in `text` as AsciiDoc.
pub fn rewrite(text: &str, references: &References) -> String {
    let mut shelf = Shelf::default();
    let text = unescape(text, &mut shelf);

    let text = CODE_SPAN.replace_all(&text, |caps: &Captures| shelf.store(caps[0].to_string()));
    let text = SELF_CLOSING_TAG.replace_all(&text, |caps: &Captures| {
        shelf.store(format!("pass:[{}]", &caps[0]))
    });
    let mut text = text.into_owned();
    for tag in PAIRED_TAGS.iter() {
        text = tag
            .replace_all(&text, |caps: &Captures| shelf.store(format!("pass:[{}]", &caps[0])))
            .into_owned();
    }

    let text = REFERENCE_IMAGE.replace_all(&text, |caps: &Captures| {
        let label = if caps[2].trim().is_empty() { &caps[1] } else { &caps[2] };
        match references.get(label) {
            Some(reference) => {
                let target = shelf.store(format!("image:{}", reference.url));
                format!("{target}[{}]", &caps[1])
            }
            None => caps[0].to_string(),
        }
    });

    let image_only = {
        let trimmed = text.trim();
        IMAGE.is_match(trimmed) && IMAGE.replace_all(trimmed, "").trim().is_empty()
    };
    let prefix = if image_only { "image::" } else { "image:" };
    let text = IMAGE.replace_all(&text, |caps: &Captures| {
        let (src, title) = split_title(&caps[2]);
        let target = shelf.store(format!("{prefix}{src}"));
        match title {
            Some(title) => format!("{target}[{}, title=\"{title}\"]", &caps[1]),
            None => format!("{target}[{}]", &caps[1]),
        }
    });

    let text = AUTOLINK.replace_all(&text, |caps: &Captures| {
        let target = &caps[1];
        if !target.contains(['.', ':', '@']) {
            return caps[0].to_string();
        }
        let url = if target.contains('@') && !target.contains("://") {
            format!("mailto:{target}")
        } else if target.contains("://") {
            target.to_string()
        } else {
            format!("http://{target}")
        };
        shelf.store(format!("link:{url}[{target}]"))
    });

    let text = REFERENCE_LINK.replace_all(&text, |caps: &Captures| {
        let label = if caps[2].trim().is_empty() { &caps[1] } else { &caps[2] };
        match references.get(label) {
            Some(reference) => {
                link(&mut shelf, &reference.url, &caps[1], reference.title.as_deref())
            }
            None => caps[0].to_string(),
        }
    });

    let text = LINK.replace_all(&text, |caps: &Captures| {
        let (url, title) = split_title(&caps[2]);
        link(&mut shelf, url, &caps[1], title)
    });

    let text = STRIKETHROUGH.replace_all(&text, "[.line-through]#$1#");

    let text =
        BOLD_STARS.replace_all(&text, |caps: &Captures| shelf.store(format!("**{}**", &caps[1])));
    let text = BOLD_UNDERSCORES
        .replace_all(&text, |caps: &Captures| shelf.store(format!("**{}**", &caps[1])));
    let text = italic(&text);

    shelf.restore(&text)
}

/// Shelves punctuation escaped with a backslash so it comes out literally.
fn unescape(text: &str, shelf: &mut Shelf) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '\\' && ESCAPABLE.contains(next) => {
                out.push_str(&shelf.store(next.to_string()));
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn split_title(target: &str) -> (&str, Option<&str>) {
    match TITLED_TARGET.captures(target) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(url), Some(title)) => (url.as_str(), Some(title.as_str())),
            _ => (target, None),
        },
        None => (target, None),
    }
}

fn link(shelf: &mut Shelf, url: &str, text: &str, title: Option<&str>) -> String {
    let target = shelf.store(format!("link:{url}"));
    match title {
        Some(title) => format!("{target}[{text}, title=\"{title}\"]"),
        None => format!("{target}[{text}]"),
    }
}

/// `*x*` becomes `_x_`. Matches share their boundary characters, so the scan is repeated
/// until nothing changes.
fn italic(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = ITALIC_STAR
            .replace_all(&current, |caps: &Captures| {
                if caps[2].trim().is_empty() {
                    caps[0].to_string()
                } else {
                    format!("{}_{}_{}", &caps[1], &caps[2], &caps[3])
                }
            })
            .into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}
