use adocx_engine::render::html::PICO_CDN;
use adocx_engine::{HtmlOptions, Stylesheet, parse, render_html_document, to_html, to_xml};
use pretty_assertions::assert_eq;

fn fragment(source: &str) -> String {
    to_html(&parse(source), &HtmlOptions::default())
}

#[test]
fn section_wraps_heading_and_body() {
    assert_eq!(
        fragment("== Intro\n\nHello."),
        "<section class=\"sect1\">\n<h2 id=\"intro\">Intro</h2>\n<p>Hello.</p>\n</section>\n"
    );
}

#[test]
fn unordered_list_items() {
    assert_eq!(fragment("* a\n* b"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
}

#[test]
fn table_has_head_and_body() {
    let html = fragment("|===\n|H1|H2\n|c1|c2\n|===");
    assert!(html.starts_with("<table class=\"table\">\n<thead>\n<tr>\n<th>H1</th>\n<th>H2</th>\n</tr>\n</thead>\n"));
    assert!(html.contains("<tbody>\n<tr>\n<td>c1</td>\n<td>c2</td>\n</tr>\n</tbody>\n</table>\n"));
}

#[test]
fn source_listing_keeps_language_and_escapes() {
    let html = fragment("[source,rust]\n----\nlet ok = 1 < 2;\n----");
    assert_eq!(
        html,
        "<pre><code class=\"language-rust\" data-language=\"rust\">let ok = 1 &lt; 2;</code></pre>\n"
    );
}

#[test]
fn admonition_paragraph() {
    assert_eq!(
        fragment("WARNING: Hot."),
        "<div class=\"admonition admonition-warning\">\n<p class=\"admonition-title\">WARNING</p>\n<p>Hot.</p>\n</div>\n"
    );
}

#[test]
fn standalone_with_cdn_stylesheet() {
    let root = parse("= Guide\n:author: Ann\n\nBody.");
    let options = HtmlOptions {
        standalone: true,
        stylesheet: Stylesheet::Cdn,
        ..HtmlOptions::default()
    };
    let (html, meta) = render_html_document(&root, &options);

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n"));
    assert!(html.contains("<title>Guide</title>"));
    assert!(html.contains(&format!("<link rel=\"stylesheet\" href=\"{PICO_CDN}\">")));
    assert!(html.contains("<header>\n<h1>Guide</h1>\n"));
    assert!(html.contains("<main>\n<p>Body.</p>\n</main>"));
    assert!(html.ends_with("</html>\n"));
    assert_eq!(meta.title.as_deref(), Some("Guide"));
    assert_eq!(meta.author.as_deref(), Some("Ann"));
}

#[test]
fn xhtml_document_has_prolog_and_namespace() {
    let root = parse("= Guide\n\n'''");
    let options = HtmlOptions {
        standalone: true,
        xhtml: true,
        lang: Some("fr".into()),
        ..HtmlOptions::default()
    };
    let html = to_html(&root, &options);
    assert!(html.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"fr\">"
    ));
    assert!(html.contains("<meta charset=\"UTF-8\"/>"));
    assert!(html.contains("<hr/>"));
}

#[test]
fn inline_stylesheet_is_embedded() {
    let root = parse("Text.");
    let options = HtmlOptions {
        standalone: true,
        stylesheet: Stylesheet::Inline("body { margin: 0; }".into()),
        ..HtmlOptions::default()
    };
    assert!(to_html(&root, &options).contains("<style>\nbody { margin: 0; }\n</style>\n"));
}

#[test]
fn xml_nests_sections() {
    let xml = to_xml(&parse("== A\n\nX"));
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document doctype=\"article\">\n"));
    assert!(xml.contains("\n  <section id=\"a\" level=\"1\" title=\"A\">\n    <paragraph>X</paragraph>\n  </section>\n"));
    assert!(xml.ends_with("</document>\n"));
}
