use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wavedrom_rs_renderer::{Config, parse_document, render_svg};

fn dense_waveform_source(signals: usize, cells: usize) -> String {
    let mut out = String::from("{ signal: [\n");
    for i in 0..signals {
        let wave: String = (0..cells)
            .map(|c| match if c == 0 { 0 } else { (i + c) % 4 } {
                0 => '0',
                1 => '1',
                2 => '.',
                _ => '=',
            })
            .collect();
        out.push_str(&format!("  {{ name: 'sig{}', wave: '{}' }},\n", i, wave));
    }
    out.push_str("]}\n");
    out
}

fn fixture(name: &str) -> &'static str {
    match name {
        "ddr_burst" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/ddr_burst.json5"
        )),
        "wide_bus" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/benches/fixtures/wide_bus.json5"
        )),
        _ => panic!("unknown fixture"),
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in ["ddr_burst", "wide_bus"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let doc = parse_document(black_box(data)).expect("parse failed");
                black_box(doc.edges.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let config = Config::default();
    for name in ["ddr_burst", "wide_bus"] {
        let doc = parse_document(fixture(name)).expect("parse failed");
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| {
                let svg = render_svg(black_box(doc), &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for (signals, cells) in [(8usize, 32usize), (32, 64), (64, 128)] {
        let name = format!("dense_{}x{}", signals, cells);
        let input = dense_waveform_source(signals, cells);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let doc = parse_document(black_box(data)).expect("parse failed");
                let svg = render_svg(&doc, &config);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_render, bench_end_to_end
);
criterion_main!(benches);
