use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use risk_matrix_renderer::config::{Config, PackingConfig, PackingStrategy};
use risk_matrix_renderer::layout::{compute_layout, pack};
use risk_matrix_renderer::parser::parse_risk_rows;
use risk_matrix_renderer::render::render_svg;
use std::hint::black_box;

fn register_source(rows: usize) -> String {
    let mut out = String::from("[");
    for i in 0..rows {
        if i > 0 {
            out.push(',');
        }
        // cycle through the 25 cells so buckets grow evenly
        let consequence = i % 5 + 1;
        let likelihood = (i / 5) % 5 + 1;
        out.push_str(&format!(
            "{{\"label\": \"Risk {i}\", \"consequence\": {consequence}, \"likelihood\": {likelihood}}}"
        ));
    }
    out.push(']');
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = Config::default();
    for rows in [10usize, 100, 1000] {
        let input = register_source(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_risk_rows(black_box(data), &config.source);
                black_box(parsed.set.items.len());
            });
        });
    }
    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    let config = PackingConfig::default();
    for strategy in [PackingStrategy::Grid, PackingStrategy::Hex] {
        for n in [1usize, 8, 32, 128] {
            let name = format!("{strategy:?}_{n}");
            group.bench_with_input(BenchmarkId::from_parameter(name), &n, |b, &n| {
                b.iter(|| {
                    let packing = pack(strategy, black_box(n), 180.0, 120.0, &config);
                    black_box(packing.offsets.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for rows in [10usize, 100, 1000] {
        let input = register_source(rows);
        let parsed = parse_risk_rows(&input, &config.source);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &parsed.set, |b, set| {
            b.iter(|| {
                let layout = compute_layout(black_box(set), &config.theme, &config.layout);
                black_box(layout.markers.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let config = Config::default();
    for rows in [10usize, 100, 1000] {
        let input = register_source(rows);
        let parsed = parse_risk_rows(&input, &config.source);
        let layout = compute_layout(&parsed.set, &config.theme, &config.layout);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &config.theme, &config.layout);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for rows in [10usize, 100, 1000] {
        let input = register_source(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &input, |b, data| {
            b.iter(|| {
                let parsed = parse_risk_rows(black_box(data), &config.source);
                let layout = compute_layout(&parsed.set, &config.theme, &config.layout);
                let svg = render_svg(&layout, &config.theme, &config.layout);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_pack, bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
