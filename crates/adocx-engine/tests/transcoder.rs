use adocx_engine::parsing::snapshot;
use adocx_engine::{Node, NodeKind, convert_markdown_to_asciidoc, parse};
use pretty_assertions::assert_eq;

/// Transcodes Markdown, parses the result and checks the tree invariants.
fn through_asciidoc(markdown: &str) -> Node {
    let root = parse(&convert_markdown_to_asciidoc(markdown));
    snapshot::invariants(&root);
    root
}

#[test]
fn frontmatter_feeds_document_attributes() {
    let root = through_asciidoc("---\ntitle: Post\ntags:\n  - a\n  - b\n---\n\n## Content\n\nBody");
    assert_eq!(root.attribute("title"), Some("Post"));
    assert_eq!(root.attribute("tags"), Some("a, b"));
    let sections = root.find_by_tag("Section");
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].attribute("title"), Some("Content"));
    assert_eq!(sections[0].attribute("level"), Some("1"));
}

#[test]
fn emphasis_keeps_its_strength() {
    let root = through_asciidoc("Some **bold** and *soft* text.");
    let bold = root.find_by_tag("Bold");
    let italic = root.find_by_tag("Italic");
    assert_eq!(bold.len(), 1);
    assert_eq!(bold[0].text_content(), "bold");
    assert_eq!(italic.len(), 1);
    assert_eq!(italic[0].text_content(), "soft");
}

#[test]
fn links_survive_with_their_targets() {
    let root = through_asciidoc("Read [the docs](https://docs.example.com/guide).");
    let links = root.find_by_tag("Link");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].attribute("href"), Some("https://docs.example.com/guide"));
    assert_eq!(links[0].text_content(), "the docs");
}

#[test]
fn gfm_table_becomes_table() {
    let root = through_asciidoc("| A | B |\n|---|---|\n| 1 | 2 |");
    let table = &root.children[0];
    assert_eq!(table.kind, NodeKind::Table);
    let rows: Vec<Vec<String>> = table
        .children
        .iter()
        .map(|row| row.children.iter().map(Node::text_content).collect())
        .collect();
    assert_eq!(rows, vec![vec!["A", "B"], vec!["1", "2"]]);
    assert_eq!(table.children[0].attribute("role"), Some("header"));
}

#[test]
fn fenced_code_stays_verbatim() {
    let root = through_asciidoc("```rust\nlet x = *a* + b_c_d;\n```");
    let code = &root.children[0];
    assert_eq!(code.kind, NodeKind::CodeBlock);
    assert_eq!(code.attribute("language"), Some("rust"));
    assert_eq!(code.text_content(), "let x = *a* + b_c_d;");
}

#[test]
fn rules_and_quotes() {
    let root = through_asciidoc("before\n\n---\n\n> wise words");
    let kinds: Vec<&NodeKind> = root.children.iter().map(|child| &child.kind).collect();
    assert_eq!(
        kinds,
        vec![&NodeKind::Paragraph, &NodeKind::ThematicBreak, &NodeKind::Quote]
    );
    assert_eq!(root.children[2].text_content(), "wise words");
}

#[test]
fn github_alert_becomes_admonition() {
    let root = through_asciidoc("> [!TIP]\n> Use the force.");
    let admonition = &root.children[0];
    assert_eq!(admonition.kind, NodeKind::Admonition);
    assert_eq!(admonition.attribute("type"), Some("tip"));
    assert_eq!(admonition.text_content(), "Use the force.");
}
