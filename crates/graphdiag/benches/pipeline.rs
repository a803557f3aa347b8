use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use graphdiag::layout::{Algorithm, apply_layout};
use graphdiag::render::{BundledIconFetcher, RenderOptions, render_svg_sync};
use graphdiag::{HeadlessRenderer, parse};

fn fixtures() -> Vec<(&'static str, String)> {
    let mut ring = String::from("graphDiagram Ring\n");
    for i in 0..40 {
        ring.push_str(&format!("N{i}-2->N{}: link {i}\n", (i + 1) % 40));
    }
    vec![
        (
            "demo",
            "graphDiagram Demo\nperson Alice 25 #lightgreen\nnode Bob 12 #lightblue\nAlice->Bob: Hi"
                .to_string(),
        ),
        (
            "parallel",
            "A->B: one\nA->B: two\nA->B: three\nB<-C\nC--A".to_string(),
        ),
        ("ring", ring),
    ]
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, input) in fixtures() {
        group.bench_function(name, |b| b.iter(|| parse(&input)));
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for (name, input) in fixtures() {
        let graph = parse(&input);
        for algorithm in ["circular", "simple-force", "force-atlas2"] {
            let algo: Algorithm = algorithm
                .parse::<Algorithm>()
                .unwrap()
                .with_seed(Some(1));
            group.bench_function(format!("{name}/{algorithm}"), |b| {
                b.iter_batched(
                    || graph.clone(),
                    |mut g| apply_layout(&mut g, &algo),
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_render_svg_sync(c: &mut Criterion) {
    let fetcher = BundledIconFetcher::new();
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("render_svg_sync");
    for (name, input) in fixtures() {
        let mut graph = parse(&input);
        apply_layout(&mut graph, &Algorithm::Circular);
        group.bench_function(name, |b| b.iter(|| render_svg_sync(&graph, &options, &fetcher)));
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let renderer = HeadlessRenderer::new().with_layout(Algorithm::default().with_seed(Some(7)));
    let mut group = c.benchmark_group("pipeline");
    for (name, input) in fixtures() {
        group.bench_function(name, |b| b.iter(|| renderer.render_svg_sync(&input)));
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_layout,
    bench_render_svg_sync,
    bench_pipeline
);
criterion_main!(benches);
