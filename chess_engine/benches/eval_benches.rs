use std::time::Duration;

use criterion::{black_box, Criterion};

use chess_core::tools::eval::Eval;
use chess_core::Position;

static RAND_POSITIONS_100: [&str; 10] = [
    "3qkb1r/3ppp2/3r1np1/2Q4p/5P2/1P3B2/P1P1PP1P/R2NK2R b k - 0 22",
    "r3kb1r/1p1bpp2/1p3n1p/q2p2p1/8/PQ6/1P1NPPPP/R3KBNR w KQkq - 2 14",
    "r2qkbnr/pp2p1pp/2p1b3/3pNpB1/3P4/8/PP1NPPPP/R2QKB1R w KQkq - 2 8",
    "r1bqk2r/pppp3p/5b2/1P6/5p2/P5P1/1QP1P2P/RN2KB1R b KQkq - 2 16",
    "r1bqkbnr/ppppppp1/n7/3P2p1/Q4P2/2P5/PP2P1PP/RN2KBNR b KQkq - 2 6",
    "rn2kb1r/1ppqpbpp/5n2/p3Q3/8/PP1P4/1BPP1PPP/R2NKB1R b KQkq - 3 13",
    "r2qkbnr/ppp1Bppp/2n5/3p1b2/3P4/2N5/PPP1PPPP/R2QKBNR b KQkq - 0 4",
    "r1bqkb1r/ppp1pppp/2n5/3p2B1/P2Pn3/1P6/2P1PPPP/RN1QKBNR w KQkq - 2 5",
    "r1bqkbnr/pppppppp/2n5/6B1/3P4/8/PPP1PPPP/RN1QKBNR b KQkq - 2 2",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
];

fn bench_eval_100_positions(c: &mut Criterion) {
    let positions: Vec<Position> = RAND_POSITIONS_100
        .iter()
        .cycle()
        .take(100)
        .map(|fen| Position::from_fen(fen).unwrap())
        .collect();

    c.bench_function("Eval::eval over 100 positions", |b| {
        b.iter(|| {
            let mut total: i64 = 0;
            for pos in positions.iter() {
                total += black_box(Eval::eval(pos)) as i64;
            }
            black_box(total)
        })
    });
}

criterion_group!(name = eval_benches;
    config = Criterion::default().sample_size(50).warm_up_time(Duration::from_millis(100));
    targets = bench_eval_100_positions
);
