#[macro_use]
extern crate criterion;

mod bit_benches;
mod movegen_benches;

criterion_main! {
    bit_benches::bit_benches,
    board_benches::board_benches,
    movegen_benches::movegen_benches,
}
