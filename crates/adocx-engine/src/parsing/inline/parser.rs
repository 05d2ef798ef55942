use regex::{Captures, Regex};

use crate::ast::{Node, NodeKind};
use crate::context::{AttributeTable, ParseContext};
use crate::parsing::attrlist::AttrList;

use super::kinds::{InlineMacros, Mark, at_word_boundary};

/// What a candidate span matched, with the captured pieces needed to build its node.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Found {
    Mark {
        mark: Mark,
        role: Option<String>,
        text: String,
    },
    Passthrough(String),
    Url {
        href: String,
        attrs: Option<String>,
    },
    Link {
        href: String,
        attrs: Option<String>,
    },
    Image {
        src: String,
        attrs: String,
    },
    Macro {
        name: String,
        target: String,
        text: String,
    },
    Xref {
        target: String,
        text: Option<String>,
    },
    Anchor {
        id: String,
        label: Option<String>,
    },
    Footnote {
        id: Option<String>,
        text: String,
    },
    FootnoteRef {
        id: String,
        text: Option<String>,
    },
}

/// A matched span `[start, end)` of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    start: usize,
    end: usize,
    found: Found,
}

/// Parses a span of inline text into a sequence of inline nodes.
///
/// Every pattern family is matched independently over the whole text. The resulting
/// candidates are pooled in family order and stable-sorted by start offset; walking
/// that list, a candidate overlapping an already accepted span is discarded, so the
/// first claim on a region wins. Accepted formatting spans have their inner text
/// parsed recursively. Literal text between accepted spans is attribute-substituted.
///
/// # Arguments
/// * `text` - The assembled text of one block (lines already joined)
/// * `attributes` - Attribute values in force at this point of the document
/// * `ctx` - Shared parse state (footnote numbering)
///
/// # Returns
/// The inline nodes in document order.
pub fn parse_inline(text: &str, attributes: &AttributeTable, ctx: &mut ParseContext) -> Vec<Node> {
    let mut candidates = collect_candidates(text);
    candidates.sort_by_key(|c| c.start);

    let mut nodes = Vec::new();
    let mut last = 0;
    for candidate in candidates {
        if candidate.start < last {
            log::trace!(
                "inline candidate at {}..{} overlaps accepted span ending at {last}",
                candidate.start,
                candidate.end
            );
            continue;
        }
        push_text(&mut nodes, &text[last..candidate.start], attributes);
        nodes.push(build_node(candidate.found, attributes, ctx));
        last = candidate.end;
    }
    push_text(&mut nodes, &text[last..], attributes);
    nodes
}

fn push_text(nodes: &mut Vec<Node>, literal: &str, attributes: &AttributeTable) {
    if literal.is_empty() {
        return;
    }
    let substituted = attributes.substitute(literal);
    if !substituted.is_empty() {
        nodes.push(Node::text(substituted));
    }
}

/// Runs every pattern family over `text`, in scan order.
fn collect_candidates(text: &str) -> Vec<Candidate> {
    let mut out = Vec::new();

    for mark in Mark::ALL {
        if !text.contains(mark.delimiter()) {
            continue;
        }
        if let Some(re) = mark.unconstrained() {
            scan(re, text, false, &mut out, |caps| mark_found(mark, caps));
        }
        scan(
            mark.constrained(),
            text,
            mark.needs_word_boundary(),
            &mut out,
            |caps| mark_found(mark, caps),
        );
    }

    scan(InlineMacros::pass_triple(), text, false, &mut out, |caps| {
        Some(Found::Passthrough(caps[1].to_string()))
    });
    scan(InlineMacros::pass_macro(), text, false, &mut out, |caps| {
        Some(Found::Passthrough(caps[1].to_string()))
    });
    scan(InlineMacros::pass_single(), text, true, &mut out, |caps| {
        Some(Found::Passthrough(caps[1].to_string()))
    });

    scan_urls(text, &mut out);

    scan(InlineMacros::link(), text, false, &mut out, |caps| {
        Some(Found::Link {
            href: caps[1].to_string(),
            attrs: caps.get(2).map(|m| m.as_str().to_string()),
        })
    });
    scan(InlineMacros::mailto(), text, false, &mut out, |caps| {
        Some(Found::Link {
            href: format!("mailto:{}", &caps[1]),
            attrs: Some(caps[2].to_string()),
        })
    });
    scan(InlineMacros::image(), text, false, &mut out, |caps| {
        Some(Found::Image {
            src: caps[1].to_string(),
            attrs: caps[2].to_string(),
        })
    });
    scan(InlineMacros::generic(), text, false, &mut out, |caps| {
        let name = &caps[1];
        if InlineMacros::is_reserved(name) {
            return None;
        }
        Some(Found::Macro {
            name: name.to_string(),
            target: caps[2].to_string(),
            text: caps[3].to_string(),
        })
    });

    scan(InlineMacros::xref_angle(), text, false, &mut out, |caps| {
        Some(Found::Xref {
            target: caps[1].to_string(),
            text: non_empty(caps.get(2).map(|m| m.as_str())),
        })
    });
    scan(InlineMacros::xref_macro(), text, false, &mut out, |caps| {
        Some(Found::Xref {
            target: caps[1].to_string(),
            text: non_empty(Some(&caps[2])),
        })
    });

    scan(InlineMacros::anchor_double(), text, false, &mut out, |caps| {
        Some(Found::Anchor {
            id: caps[1].to_string(),
            label: non_empty(caps.get(2).map(|m| m.as_str())),
        })
    });
    scan(InlineMacros::anchor_hash(), text, false, &mut out, |caps| {
        Some(Found::Anchor {
            id: caps[1].to_string(),
            label: None,
        })
    });

    scan(InlineMacros::footnote(), text, false, &mut out, |caps| {
        let id = non_empty(Some(&caps[1]));
        let body = caps[2].trim().to_string();
        match (id, body.is_empty()) {
            (Some(id), true) => Some(Found::FootnoteRef { id, text: None }),
            (id, _) => Some(Found::Footnote { id, text: body }),
        }
    });
    scan(InlineMacros::footnote_ref(), text, false, &mut out, |caps| {
        Some(Found::FootnoteRef {
            id: caps[1].trim().to_string(),
            text: non_empty(caps.get(2).map(|m| m.as_str())),
        })
    });

    out
}

/// Collects matches of `re`, optionally requiring word boundaries around each match.
///
/// A rejected match restarts the search one character after its start, so a failed
/// `_x_` inside `snake_case` does not hide a later valid one.
fn scan(
    re: &Regex,
    text: &str,
    bounded: bool,
    out: &mut Vec<Candidate>,
    mut found: impl FnMut(&Captures) -> Option<Found>,
) {
    let mut from = 0;
    while from <= text.len() {
        let Some(caps) = re.captures_at(text, from) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let (start, end) = (whole.start(), whole.end());
        if bounded && !at_word_boundary(text, start, end) {
            from = next_char(text, start);
            continue;
        }
        if let Some(f) = found(&caps) {
            out.push(Candidate {
                start,
                end,
                found: f,
            });
        }
        from = if end > start { end } else { next_char(text, start) };
    }
}

fn scan_urls(text: &str, out: &mut Vec<Candidate>) {
    for caps in InlineMacros::url().captures_iter(text) {
        let (Some(whole), Some(href)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let attrs = caps.get(2).map(|m| m.as_str().to_string());
        let mut end = whole.end();
        let mut href = href.as_str();
        if attrs.is_none() {
            let trim = InlineMacros::trailing_punctuation(href);
            end -= trim;
            href = &href[..href.len() - trim];
        }
        if href.ends_with("://") {
            continue;
        }
        out.push(Candidate {
            start: whole.start(),
            end,
            found: Found::Url {
                href: href.to_string(),
                attrs,
            },
        });
    }
}

fn mark_found(mark: Mark, caps: &Captures) -> Option<Found> {
    let text = caps.get(mark.text_group())?.as_str().to_string();
    let role = match mark {
        Mark::Highlight => caps.get(1).map(|m| m.as_str().to_string()),
        _ => None,
    };
    Some(Found::Mark { mark, role, text })
}

fn next_char(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn build_node(found: Found, attributes: &AttributeTable, ctx: &mut ParseContext) -> Node {
    match found {
        Found::Mark { mark, role, text } => {
            let mut node = Node::new(mark.kind())
                .with_children(parse_inline(&text, attributes, ctx));
            if let Some(role) = role {
                apply_role_shorthand(&mut node, &role);
            }
            node
        }
        Found::Passthrough(raw) => Node::passthrough(raw),
        Found::Url { href, attrs } => {
            let href = attributes.substitute(&href).into_owned();
            link_node(href, attrs.as_deref(), attributes, ctx)
        }
        Found::Link { href, attrs } => {
            let href = attributes.substitute(&href).into_owned();
            link_node(href, attrs.as_deref(), attributes, ctx)
        }
        Found::Image { src, attrs } => {
            let list = AttrList::parse(&attrs);
            let mut node = Node::inline_macro("image")
                .with_attribute("src", attributes.substitute(&src).into_owned());
            node.set_attribute("alt", list.positional(0).unwrap_or_default());
            if let Some(width) = list.positional(1) {
                node.set_attribute("width", width);
            }
            if let Some(height) = list.positional(2) {
                node.set_attribute("height", height);
            }
            for (key, value) in list.named {
                node.set_attribute(key, value);
            }
            node
        }
        Found::Macro { name, target, text } => {
            let mut node = Node::inline_macro(name);
            if !target.is_empty() {
                node.set_attribute("target", target);
            }
            if !text.is_empty() {
                node.add_child(Node::text(attributes.substitute(&text)));
            }
            node
        }
        Found::Xref { target, text } => {
            let label = text.unwrap_or_else(|| target.clone());
            Node::inline_macro("xref")
                .with_attribute("target", target)
                .with_child(Node::text(label))
        }
        Found::Anchor { id, label } => {
            let mut node = Node::inline_macro("anchor").with_attribute("id", id);
            if let Some(label) = label {
                node.set_attribute("label", label);
            }
            node
        }
        Found::Footnote { id, text } => {
            let index = ctx.footnote_index(id.as_deref());
            let mut node =
                Node::inline_macro("footnote").with_attribute("index", index.to_string());
            if let Some(id) = id {
                node.set_attribute("id", id);
            }
            node.with_children(parse_inline(&text, attributes, ctx))
        }
        Found::FootnoteRef { id, text } => match text {
            Some(text) => build_node(
                Found::Footnote {
                    id: Some(id),
                    text,
                },
                attributes,
                ctx,
            ),
            None => {
                let mut node = Node::inline_macro("footnoteref").with_attribute("id", id.clone());
                if let Some(index) = ctx.footnote_ref(&id) {
                    node.set_attribute("index", index.to_string());
                }
                node
            }
        },
    }
}

fn link_node(
    href: String,
    attrs: Option<&str>,
    attributes: &AttributeTable,
    ctx: &mut ParseContext,
) -> Node {
    let list = attrs.map(AttrList::parse).unwrap_or_default();
    let mut node = Node::new(NodeKind::Link).with_attribute("href", href.clone());
    for key in ["window", "role", "title"] {
        if let Some(value) = list.named(key) {
            node.set_attribute(key, value);
        }
    }
    match list.positional(0) {
        Some(text) => {
            let text = match text.strip_suffix('^') {
                Some(stripped) => {
                    node.set_attribute("window", "_blank");
                    stripped
                }
                None => text,
            };
            node.children = parse_inline(text, attributes, ctx);
        }
        None => node.add_child(Node::text(href)),
    }
    node
}

/// Applies a `[#id.role]`-style shorthand (or a bare role name) to an inline node.
fn apply_role_shorthand(node: &mut Node, spec: &str) {
    let spec = spec.trim();
    if !spec.starts_with(['.', '#']) {
        if !spec.is_empty() {
            node.set_attribute("role", spec);
        }
        return;
    }
    let mut roles = Vec::new();
    let mut rest = spec;
    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let stop = body.find(['.', '#']).unwrap_or(body.len());
        let value = &body[..stop];
        if !value.is_empty() {
            match marker {
                '#' => node.set_attribute("id", value),
                _ => roles.push(value),
            }
        }
        rest = &body[stop..];
    }
    if !roles.is_empty() {
        node.set_attribute("role", roles.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Vec<Node> {
        let mut ctx = ParseContext::new();
        parse_inline(text, &AttributeTable::new(), &mut ctx)
    }

    fn kinds(nodes: &[Node]) -> Vec<&'static str> {
        nodes.iter().map(|n| n.kind.name()).collect()
    }

    #[test]
    fn plain_text() {
        assert_eq!(parse("just words"), vec![Node::text("just words")]);
    }

    #[test]
    fn bold_between_text() {
        assert_eq!(
            parse("Hello *world*."),
            vec![
                Node::text("Hello "),
                Node::new(NodeKind::Bold).with_child(Node::text("world")),
                Node::text("."),
            ]
        );
    }

    #[test]
    fn unconstrained_bold_claims_whole_span() {
        let nodes = parse("**bold**text");
        assert_eq!(kinds(&nodes), vec!["Bold", "Text"]);
        assert_eq!(nodes[0].text_content(), "bold");
    }

    #[test]
    fn constrained_marks_need_boundaries() {
        assert_eq!(parse("snake_case_name"), vec![Node::text("snake_case_name")]);
        let nodes = parse("a_b _c_");
        assert_eq!(kinds(&nodes), vec!["Text", "Italic"]);
    }

    #[test]
    fn nested_formatting_is_reparsed() {
        let nodes = parse("*E=mc^2^*");
        assert_eq!(kinds(&nodes), vec!["Bold"]);
        assert_eq!(kinds(&nodes[0].children), vec!["Text", "Superscript"]);
    }

    #[test]
    fn first_claim_wins_on_overlap() {
        // `_b *c_` starts first and claims the region the bold span needed.
        let nodes = parse("_b *c_ d*");
        assert_eq!(kinds(&nodes), vec!["Italic", "Text"]);
        assert_eq!(nodes[1], Node::text(" d*"));
    }

    #[test]
    fn sub_and_superscript() {
        let nodes = parse("H~2~O and x^2^");
        assert_eq!(kinds(&nodes), vec!["Text", "Subscript", "Text", "Superscript"]);
    }

    #[test]
    fn highlight_with_role() {
        let nodes = parse("[.line-through]#gone#");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind, NodeKind::Highlight);
        assert_eq!(nodes[0].attribute("role"), Some("line-through"));
    }

    #[test]
    fn passthrough_is_raw() {
        let nodes = parse("keep +<b>*raw*</b>+ here");
        assert_eq!(nodes[1], Node::passthrough("<b>*raw*</b>"));
        let nodes = parse("pass:[<u>x</u>]");
        assert_eq!(nodes, vec![Node::passthrough("<u>x</u>")]);
    }

    #[test]
    fn bare_url_drops_trailing_period() {
        let nodes = parse("Visit https://example.com.");
        assert_eq!(nodes[1].attribute("href"), Some("https://example.com"));
        assert_eq!(nodes[1].text_content(), "https://example.com");
        assert_eq!(nodes[2], Node::text("."));
    }

    #[test]
    fn link_macro_with_named_attributes() {
        let nodes = parse(r#"link:https://x.org[Site, window="_blank", role="external"]"#);
        let link = &nodes[0];
        assert_eq!(link.kind, NodeKind::Link);
        assert_eq!(link.attribute("href"), Some("https://x.org"));
        assert_eq!(link.attribute("window"), Some("_blank"));
        assert_eq!(link.attribute("role"), Some("external"));
        assert_eq!(link.text_content(), "Site");
    }

    #[test]
    fn generic_macros() {
        let nodes = parse("Press kbd:[Ctrl+C] then btn:[Submit] via menu:File[New Document]");
        let macros: Vec<_> = nodes.iter().filter_map(Node::macro_name).collect();
        assert_eq!(macros, vec!["kbd", "btn", "menu"]);
        let menu = nodes.last().unwrap();
        assert_eq!(menu.attribute("target"), Some("File"));
        assert_eq!(menu.text_content(), "New Document");
    }

    #[test]
    fn cross_references_keep_raw_target() {
        let nodes = parse("See <<setup>> and xref:usage[the usage guide].");
        assert_eq!(nodes[1].attribute("target"), Some("setup"));
        assert_eq!(nodes[1].text_content(), "setup");
        assert_eq!(nodes[3].attribute("target"), Some("usage"));
        assert_eq!(nodes[3].text_content(), "the usage guide");
    }

    #[test]
    fn inline_anchor() {
        let nodes = parse("[#here]Marked text");
        assert_eq!(nodes[0].macro_name(), Some("anchor"));
        assert_eq!(nodes[0].attribute("id"), Some("here"));
    }

    #[test]
    fn footnotes_are_numbered() {
        let nodes = parse("A.footnote:[First] B.footnote:second[Second] C.footnote:second[]");
        let notes: Vec<_> = nodes.iter().filter(|n| n.macro_name().is_some()).collect();
        assert_eq!(notes[0].attribute("index"), Some("1"));
        assert_eq!(notes[1].attribute("index"), Some("2"));
        assert_eq!(notes[2].macro_name(), Some("footnoteref"));
        assert_eq!(notes[2].attribute("index"), Some("2"));
    }

    #[test]
    fn literal_text_is_substituted() {
        let attrs: AttributeTable = [("name", "adocx")].into_iter().collect();
        let mut ctx = ParseContext::new();
        let nodes = parse_inline("Using {name} and {missing}!", &attrs, &mut ctx);
        assert_eq!(nodes, vec![Node::text("Using adocx and !")]);
    }
}
