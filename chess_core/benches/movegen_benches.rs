use std::time::Duration;

use criterion::{black_box, Criterion};

use chess_core::board::perft::perft;
use chess_core::tools::eval::Eval;
use chess_core::Position;

fn bench_generate_moves(c: &mut Criterion) {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    c.bench_function("generate_moves on kiwipete", |b| {
        b.iter(|| black_box(pos.generate_moves()))
    });
}

fn bench_perft_depth_4(c: &mut Criterion) {
    let pos = Position::start_pos();
    c.bench_function("perft depth 4 from start position", |b| {
        b.iter(|| black_box(perft(&pos, 4)))
    });
}

fn bench_eval(c: &mut Criterion) {
    let pos = Position::start_pos();
    c.bench_function("Eval::eval on the starting position", |b| {
        b.iter(|| black_box(Eval::eval(&pos)))
    });
}

criterion_group!(
    name = movegen_benches;
    config = Criterion::default().sample_size(20).warm_up_time(Duration::from_millis(200));
    targets = bench_generate_moves, bench_perft_depth_4, bench_eval
);
