//! Zobrist hash uniqueness across a random walk through the game tree. `board_hash.rs`
//! checks the incremental hash against a from-scratch recompute; this file checks that
//! distinct positions reached along the way don't collide.

extern crate rand;

use std::collections::HashSet;

use chess_core::Position;

fn random_walk(pos: &mut Position, depth: usize, seen: &mut HashSet<u64>) {
    seen.insert(pos.hash());
    if depth == 0 {
        return;
    }

    let moves = pos.generate_moves();
    if moves.is_empty() {
        return;
    }

    let chosen = moves.as_slice()[rand::random::<usize>() % moves.len()];
    pos.make_move(chosen);
    random_walk(pos, depth - 1, seen);
    pos.undo_move(chosen);
}

#[test]
fn a_random_walk_visits_many_positions_with_no_hash_collisions() {
    let mut seen = HashSet::new();

    for _ in 0..20 {
        let mut pos = Position::start_pos();
        random_walk(&mut pos, 12, &mut seen);
    }

    // Every walk inserts at least the starting position's hash, and the 20 independent
    // walks should diverge well before move 12, so this should be comfortably above 1.
    assert!(seen.len() > 20);
}

#[test]
fn the_starting_position_always_hashes_the_same() {
    let a = Position::start_pos();
    let b = Position::start_pos();
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn undoing_every_move_in_a_walk_restores_the_original_hash() {
    let mut pos = Position::start_pos();
    let original = pos.hash();

    let mut played = Vec::new();
    for _ in 0..8 {
        let moves = pos.generate_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rand::random::<usize>() % moves.len()];
        pos.make_move(mv);
        played.push(mv);
    }

    for mv in played.into_iter().rev() {
        pos.undo_move(mv);
    }

    assert_eq!(pos.hash(), original);
}
