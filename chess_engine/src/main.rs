//! Minimal CLI driver: load a position from a FEN (or the standard starting position),
//! search it to a given depth, and print the best move, score, and principal variation.
//!
//! There is no UCI loop and no time management here; both are out of scope for this
//! engine (see `chess_engine`'s crate docs).

use std::env;

use chess_engine::engine::Engine;
use chess_engine::options::EngineOptions;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut fen: Option<String> = None;
    let mut depth: u8 = EngineOptions::default().max_depth;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" => {
                if let Some(value) = args.next() {
                    depth = value.parse().unwrap_or(depth);
                }
            }
            "--fen" => {
                fen = args.next();
            }
            other => log::warn!("ignoring unrecognized argument: {}", other),
        }
    }

    let mut options = EngineOptions::default();
    options.max_depth = depth;
    let mut engine = Engine::with_options(options).unwrap_or_else(|err| {
        eprintln!("invalid engine options: {}", err);
        std::process::exit(1);
    });

    if let Some(fen) = fen {
        if let Err(err) = engine.position_from_fen(&fen) {
            eprintln!("invalid FEN: {}", err);
            std::process::exit(1);
        }
    }

    let result = engine.search();
    let pv: Vec<String> = result.pv.iter().map(|mv| mv.stringify()).collect();

    println!("bestmove {}", result.best_move.stringify());
    println!("score {}", result.score);
    println!("depth {}", result.depth);
    println!("nodes {}", result.nodes);
    println!("pv {}", pv.join(" "));
}
