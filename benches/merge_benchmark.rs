//! Benchmarks for slidemerge.
//!
//! Run with: cargo bench
//!
//! These benchmarks merge synthetic decks of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slidemerge::merge::{self, scan};
use slidemerge::model::{
    Geometry, ImageResource, Page, Paragraph, RichText, Shape, Table, TableShape, TextRun,
    TextShape,
};
use slidemerge::{DatasetKind, Datasets, Document, Mapping};

/// Creates a deck with a title, a split-run body, a logo box and a milestone table per page.
fn create_test_deck(page_count: u32) -> Document {
    let mut doc = Document::new();
    for number in 1..=page_count {
        let mut page = Page::new(number);
        page.add_shape(Shape::Text(TextShape::new(
            1,
            Geometry::inches(0.5, 0.3, 9.0, 1.0),
            RichText::plain("Status for {{CUSTOMER_NAME}} as of {{DATE}}"),
        )));
        page.add_shape(Shape::Text(TextShape::new(
            2,
            Geometry::inches(0.5, 1.5, 9.0, 1.0),
            RichText::from_paragraphs(vec![Paragraph::from_runs(vec![
                TextRun::bold("Owner: "),
                TextRun::new("{{PROJECT_"),
                TextRun::new("MANAGER}}"),
            ])]),
        )));
        page.add_shape(Shape::Text(TextShape::new(
            3,
            Geometry::inches(8.0, 6.5, 1.5, 0.75),
            RichText::plain("{{LOGO}}"),
        )));

        let mut rows = vec![vec![
            "Milestone".to_string(),
            "Baseline Date".to_string(),
            "Target Completion Date".to_string(),
            "Status".to_string(),
        ]];
        rows.extend((0..6).map(|_| vec![String::new(); 4]));
        page.add_shape(Shape::Table(TableShape::new(
            4,
            Geometry::inches(0.5, 2.5, 9.0, 3.5),
            Table::from_strings(rows),
        )));
        doc.add_page(page);
    }
    doc
}

fn inputs() -> (Mapping, Datasets, ImageResource) {
    let mapping = Mapping::new()
        .with_field("CUSTOMER_NAME", "Contoso")
        .with_field("DATE", "14/11/2025")
        .with_field("PROJECT_MANAGER", "Dana Smith");
    let datasets = Datasets::new().with(
        DatasetKind::Milestones,
        (0..4).map(|i| {
            vec![
                format!("Phase {}", i + 1),
                "01/06/2025".to_string(),
                "15/06/2025".to_string(),
                "Done".to_string(),
            ]
        }),
    );
    let image = ImageResource::new(vec![0; 64], "image/png").with_dimensions(200, 100);
    (mapping, datasets, image)
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for pages in [1u32, 10, 100] {
        let doc = create_test_deck(pages);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &doc, |b, doc| {
            b.iter(|| scan(black_box(doc)))
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let (mapping, datasets, image) = inputs();
    let mut group = c.benchmark_group("merge");
    for pages in [1u32, 10, 100] {
        let doc = create_test_deck(pages);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &doc, |b, doc| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| merge::merge(&mut doc, &mapping, Some(&image), &datasets),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan, bench_merge);
criterion_main!(benches);
