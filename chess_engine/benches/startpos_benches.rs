use std::time::Duration;

use criterion::{black_box, Criterion};

use chess_engine::engine::Engine;
use chess_engine::options::EngineOptions;

fn bench_search_at_depth(c: &mut Criterion, depth: u8) {
    let mut options = EngineOptions::default();
    options.max_depth = depth;
    let engine = Engine::with_options(options).unwrap();

    c.bench_function(&format!("search from start position, depth {}", depth), |b| {
        b.iter(|| black_box(engine.search()))
    });
}

fn engine_2_ply(c: &mut Criterion) {
    bench_search_at_depth(c, 2);
}

fn engine_3_ply(c: &mut Criterion) {
    bench_search_at_depth(c, 3);
}

fn engine_4_ply(c: &mut Criterion) {
    bench_search_at_depth(c, 4);
}

criterion_group!(name = startpos_benches;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::from_millis(100));
    targets = engine_2_ply, engine_3_ply, engine_4_ply
);
