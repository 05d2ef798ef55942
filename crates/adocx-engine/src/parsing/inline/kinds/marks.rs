use std::sync::LazyLock;

use regex::Regex;

use crate::ast::NodeKind;

static STRONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").expect("Invalid strong regex")
});
static STRONG_UNCONSTRAINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("Invalid strong regex"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_([^_\s](?:[^_\n]*[^_\s])?)_").expect("Invalid emphasis regex")
});
static EMPHASIS_UNCONSTRAINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^\n]+?)__").expect("Invalid emphasis regex"));
static MONOSPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("Invalid monospace regex"));
static MONOSPACE_UNCONSTRAINED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``([^\n]+?)``").expect("Invalid monospace regex"));
static SUPERSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^([^\^\s]+)\^").expect("Invalid superscript regex"));
static SUBSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([^~\s]+)~").expect("Invalid subscript regex"));
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[([^\[\]]*)\])?#([^#\s](?:[^#\n]*[^#\s])?)#").expect("Invalid highlight regex")
});
static HIGHLIGHT_UNCONSTRAINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\[([^\[\]]*)\])?##([^\n]+?)##").expect("Invalid highlight regex")
});

/// Quoted-text formatting marks.
///
/// Each mark owns its delimiter and patterns. Constrained forms (`*x*`) only match at
/// word boundaries; unconstrained forms (`**x**`) match anywhere. The highlight
/// patterns capture an optional `[role]` prefix in group 1 and the text in group 2;
/// every other pattern captures the text in group 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Emphasis,
    Monospace,
    Superscript,
    Subscript,
    Highlight,
}

impl Mark {
    /// Scan order. Earlier marks win ties between candidates starting at the same offset.
    pub const ALL: [Mark; 6] = [
        Mark::Strong,
        Mark::Emphasis,
        Mark::Monospace,
        Mark::Superscript,
        Mark::Subscript,
        Mark::Highlight,
    ];

    /// Character every pattern of this mark needs; text without it cannot match.
    pub fn delimiter(self) -> char {
        match self {
            Mark::Strong => '*',
            Mark::Emphasis => '_',
            Mark::Monospace => '`',
            Mark::Superscript => '^',
            Mark::Subscript => '~',
            Mark::Highlight => '#',
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            Mark::Strong => NodeKind::Bold,
            Mark::Emphasis => NodeKind::Italic,
            Mark::Monospace => NodeKind::Monospace,
            Mark::Superscript => NodeKind::Superscript,
            Mark::Subscript => NodeKind::Subscript,
            Mark::Highlight => NodeKind::Highlight,
        }
    }

    pub fn unconstrained(self) -> Option<&'static Regex> {
        match self {
            Mark::Strong => Some(&*STRONG_UNCONSTRAINED),
            Mark::Emphasis => Some(&*EMPHASIS_UNCONSTRAINED),
            Mark::Monospace => Some(&*MONOSPACE_UNCONSTRAINED),
            Mark::Highlight => Some(&*HIGHLIGHT_UNCONSTRAINED),
            Mark::Superscript | Mark::Subscript => None,
        }
    }

    pub fn constrained(self) -> &'static Regex {
        match self {
            Mark::Strong => &*STRONG,
            Mark::Emphasis => &*EMPHASIS,
            Mark::Monospace => &*MONOSPACE,
            Mark::Superscript => &*SUPERSCRIPT,
            Mark::Subscript => &*SUBSCRIPT,
            Mark::Highlight => &*HIGHLIGHT,
        }
    }

    /// Superscript and subscript may sit inside words (`x^2^`, `H~2~O`).
    pub fn needs_word_boundary(self) -> bool {
        !matches!(self, Mark::Superscript | Mark::Subscript)
    }

    /// Capture group holding the marked text.
    pub fn text_group(self) -> usize {
        match self {
            Mark::Highlight => 2,
            _ => 1,
        }
    }
}

/// True when the match `[start, end)` is not glued to word characters on either side.
pub fn at_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
