//! Benchmarks for numbering, navigation and page rendering.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use pireader::model::{Section, Subsection};
use pireader::{
    Action, MemoryLocation, Navigator, ProviderConfig, Reader, StaticProvider, ref_number,
};

const MANIFEST: &str = include_str!("../tests/fixtures/sample-product/content.json");

/// A label-sized tree: 17 sections, every other one with 6 subsections.
fn label_sections() -> Vec<Section> {
    (0..17)
        .map(|i| Section {
            id: format!("s{i}"),
            title: format!("Section {i}"),
            subsections: if i % 2 == 0 {
                (0..6)
                    .map(|j| Subsection {
                        id: format!("s{i}-{j}"),
                        title: format!("Subsection {i}.{j}"),
                        ..Default::default()
                    })
                    .collect()
            } else {
                Vec::new()
            },
            ..Default::default()
        })
        .collect()
}

// ============================================================================
// Numbering
// ============================================================================

fn bench_ref_number(c: &mut Criterion) {
    let sections = label_sections();
    c.bench_function("ref_number_last_subsection", |b| {
        b.iter(|| ref_number(black_box(&sections), black_box("s16-5")))
    });
    c.bench_function("ref_number_dangling", |b| {
        b.iter(|| ref_number(black_box(&sections), black_box("nonexistent")))
    });
}

// ============================================================================
// Navigation
// ============================================================================

fn bench_navigate(c: &mut Criterion) {
    let sections = label_sections();
    let targets: Vec<String> = sections
        .iter()
        .flat_map(|s| {
            std::iter::once(s.id.clone()).chain(s.subsections.iter().map(|sub| sub.id.clone()))
        })
        .collect();

    c.bench_function("navigate_every_target", |b| {
        let mut nav = Navigator::init(MemoryLocation::new(""), &sections);
        b.iter(|| {
            for id in &targets {
                nav.navigate_to(&sections, black_box(id));
            }
        })
    });
}

fn bench_render_page(c: &mut Criterion) {
    let config = ProviderConfig::new();
    let manifest = config.manifest_location();
    let provider = StaticProvider::new(config).with_body(&manifest, MANIFEST);
    let mut reader = Reader::start(provider, MemoryLocation::new("#renal"));
    reader.dispatch(Action::OpenDrawer);

    c.bench_function("render_page", |b| b.iter(|| black_box(reader.render_page())));
}

criterion_group!(benches, bench_ref_number, bench_navigate, bench_render_page);
criterion_main!(benches);
