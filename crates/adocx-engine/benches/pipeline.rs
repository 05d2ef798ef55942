use adocx_engine::{HtmlOptions, convert_markdown_to_asciidoc, parse, to_html, to_xml};
use criterion::{Criterion, criterion_group, criterion_main};

fn generate_asciidoc(size: usize) -> String {
    let base = "== Section\n\nParagraph with *bold*, _italic_ and `code` plus link:https://example.com[a link].\n\n* Bullet point\n** Nested item\n* Another item\n\n[source,rust]\n----\nfn example() {\n    println!(\"Hello\");\n}\n----\n\n|===\n|A |B\n|1 |2\n|===\n\nNOTE: Remember this.\n\n";
    format!("= Benchmark\n:toc:\n\n{}", base.repeat(size))
}

fn generate_markdown(size: usize) -> String {
    let base = "## Section\n\nParagraph with **bold**, *italic* and `code` plus [a link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| A | B |\n|---|:-:|\n| 1 | 2 |\n\n> **Note** Remember this.\n\n";
    format!("---\ntitle: Benchmark\n---\n\n{}", base.repeat(size))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(10);

    for size in [10, 100] {
        let content = generate_asciidoc(size);
        group.bench_function(format!("sections_{size}"), |b| {
            b.iter(|| std::hint::black_box(parse(std::hint::black_box(&content))));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let root = parse(&generate_asciidoc(100));
    let options = HtmlOptions {
        standalone: true,
        ..HtmlOptions::default()
    };
    group.bench_function("html", |b| {
        b.iter(|| std::hint::black_box(to_html(std::hint::black_box(&root), &options)));
    });
    group.bench_function("xml", |b| {
        b.iter(|| std::hint::black_box(to_xml(std::hint::black_box(&root))));
    });

    group.finish();
}

fn bench_transcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcode");
    group.sample_size(10);

    let content = generate_markdown(100);
    group.bench_function("markdown_to_asciidoc", |b| {
        b.iter(|| std::hint::black_box(convert_markdown_to_asciidoc(std::hint::black_box(&content))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_render, bench_transcode);
criterion_main!(benches);
