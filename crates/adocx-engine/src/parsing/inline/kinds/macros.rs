use std::sync::LazyLock;

use regex::Regex;

/// Inline macro and reference patterns.
///
/// Named macros handled by their own pattern are listed in [`InlineMacros::RESERVED`]
/// so the generic `name:target[text]` pattern skips them.
pub struct InlineMacros;

static PASS_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\+\+([^\n]+?)\+\+\+").expect("Invalid passthrough regex"));
static PASS_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+([^+\s](?:[^+\n]*[^+\s])?)\+").expect("Invalid passthrough regex")
});
static PASS_MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pass:\[([^\]]*)\]").expect("Invalid pass macro regex"));
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b((?:https?|ftp|irc)://[^\s\[\]<>"]+)(?:\[([^\]]*)\])?"#)
        .expect("Invalid URL regex")
});
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"link:([^\s\[\]]+)(?:\[([^\]]*)\])?").expect("Invalid link macro regex")
});
static MAILTO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmailto:([^\s\[\]]+)\[([^\]]*)\]").expect("Invalid mailto regex")
});
static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimage:([^:\s\[\]][^\s\[\]]*)\[([^\]]*)\]").expect("Invalid image regex")
});
static GENERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-z][a-z0-9_\-]*):([^\s\[\]]*)\[([^\]]*)\]")
        .expect("Invalid inline macro regex")
});
static XREF_ANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<<([\w#:./\-]+)(?:,\s*([^>]*?))?>>").expect("Invalid xref regex")
});
static XREF_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"xref:([\w#:./\-]+)\[([^\]]*)\]").expect("Invalid xref macro regex")
});
static ANCHOR_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([A-Za-z_][\w:.\-]*)(?:,\s*([^\]]*))?\]\]").expect("Invalid anchor regex")
});
static ANCHOR_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[#([A-Za-z_][\w:.\-]*)\]").expect("Invalid anchor regex"));
static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"footnote:([\w\-]*)\[([^\]]*)\]").expect("Invalid footnote regex")
});
static FOOTNOTE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"footnoteref:\[([^,\]]+)(?:,\s*([^\]]*))?\]").expect("Invalid footnoteref regex")
});

impl InlineMacros {
    /// Macro names never produced by the generic pattern.
    pub const RESERVED: [&'static str; 12] = [
        "link",
        "image",
        "xref",
        "footnote",
        "footnoteref",
        "pass",
        "mailto",
        "http",
        "https",
        "ftp",
        "irc",
        "file",
    ];

    /// `+++raw+++`, group 1 is the raw text.
    pub fn pass_triple() -> &'static Regex {
        &*PASS_TRIPLE
    }

    /// `+raw+`, group 1 is the raw text.
    pub fn pass_single() -> &'static Regex {
        &*PASS_SINGLE
    }

    /// `pass:[raw]`, group 1 is the raw text.
    pub fn pass_macro() -> &'static Regex {
        &*PASS_MACRO
    }

    /// Bare URL with optional `[text]`: group 1 href, group 2 attribute list.
    pub fn url() -> &'static Regex {
        &*URL
    }

    /// `link:target[text]`: group 1 target, group 2 attribute list.
    pub fn link() -> &'static Regex {
        &*LINK
    }

    /// `mailto:addr[text]`: group 1 address, group 2 attribute list.
    pub fn mailto() -> &'static Regex {
        &*MAILTO
    }

    /// `image:src[alt]`: group 1 source, group 2 attribute list.
    pub fn image() -> &'static Regex {
        &*IMAGE
    }

    /// `name:target[text]`: group 1 name, group 2 target, group 3 text.
    pub fn generic() -> &'static Regex {
        &*GENERIC
    }

    /// `<<id>>` or `<<id,text>>`.
    pub fn xref_angle() -> &'static Regex {
        &*XREF_ANGLE
    }

    /// `xref:id[text]`.
    pub fn xref_macro() -> &'static Regex {
        &*XREF_MACRO
    }

    /// `[[id]]` or `[[id,label]]`.
    pub fn anchor_double() -> &'static Regex {
        &*ANCHOR_DOUBLE
    }

    /// `[#id]`.
    pub fn anchor_hash() -> &'static Regex {
        &*ANCHOR_HASH
    }

    /// `footnote:[text]` or `footnote:id[text]`: group 1 id, group 2 text.
    pub fn footnote() -> &'static Regex {
        &*FOOTNOTE
    }

    /// `footnoteref:[id]` or `footnoteref:[id,text]`.
    pub fn footnote_ref() -> &'static Regex {
        &*FOOTNOTE_REF
    }

    pub fn is_reserved(name: &str) -> bool {
        Self::RESERVED.contains(&name)
    }

    /// Length of trailing sentence punctuation that should not be part of a bare URL.
    pub fn trailing_punctuation(href: &str) -> usize {
        href.len()
            - href
                .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\''])
                .len()
    }
}
