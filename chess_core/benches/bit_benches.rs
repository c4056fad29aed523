use std::time::Duration;

use criterion::{black_box, Criterion};
use once_cell::sync::Lazy;

use chess_core::core::bitboard::RandBitBoard;
use chess_core::BitBoard;

static BIT_SETS_DENSE_1000: Lazy<Vec<BitBoard>> =
    Lazy::new(|| RandBitBoard::default().pseudo_random(2_661_634).avg(6).max(11).many(1000));

fn bench_count_bits(c: &mut Criterion) {
    c.bench_function("count_bits over 1000 dense boards", |b| {
        b.iter(|| {
            for bits in BIT_SETS_DENSE_1000.iter() {
                black_box(bits.count_bits());
            }
        })
    });
}

fn bench_pop_lsb(c: &mut Criterion) {
    c.bench_function("pop_lsb drains 1000 dense boards", |b| {
        b.iter(|| {
            for bits in BIT_SETS_DENSE_1000.iter() {
                let mut bb = *bits;
                while bb.is_not_empty() {
                    black_box(bb.pop_lsb());
                }
            }
        })
    });
}

criterion_group!(
    name = bit_benches;
    config = Criterion::default().sample_size(30).warm_up_time(Duration::from_millis(200));
    targets = bench_count_bits, bench_pop_lsb
);
