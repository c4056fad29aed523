//! Tapered static evaluation.
//!
//! [`Eval::eval`] scores a [`Position`] from the perspective of the side to move: middle
//! game and end game sub-scores are accumulated separately as the board is walked once
//! per side, then blended by [`Score::taper`] once the game phase is known. Every term
//! below is white-minus-black; the final blended value is negated for Black to move.

use crate::board::Position;
use crate::core::masks::*;
use crate::core::score::{Score, Value};
use crate::core::{File, PieceType, Player, Rank, ALL_FILES};
use crate::helper::Helper;

/// Mobility calibration: a piece's raw reachable-square count is reduced by this many
/// "free" squares before being weighted, so that a knight or bishop with only its
/// starting mobility contributes roughly nothing.
const KNIGHT_MOBILITY_BASE: i32 = 4;
const BISHOP_MOBILITY_BASE: i32 = 6;
const ROOK_MOBILITY_BASE: i32 = 7;

const KNIGHT_MOBILITY_WEIGHT: Score = Score(4, 4);
const BISHOP_MOBILITY_WEIGHT: Score = Score(5, 5);
const ROOK_MOBILITY_WEIGHT: Score = Score(2, 4);

const PAWN_MATERIAL: Score = Score(70, 90);
const KNIGHT_MATERIAL: Score = Score(325, 325);
const BISHOP_MATERIAL: Score = Score(325, 325);
const ROOK_MATERIAL: Score = Score(500, 500);
const QUEEN_MATERIAL: Score = Score(975, 975);
const BISHOP_PAIR: Score = Score(50, 50);

const DOUBLED_PAWN: Score = Score(10, 20);
const ISOLATED_PAWN: Score = Score(10, 20);
const ISOLATED_OPEN_PAWN: Score = Score(20, 20);
const BACKWARD_PAWN: Score = Score(8, 10);
const BACKWARD_OPEN_PAWN: Score = Score(16, 10);

const CLOSED_FILE: Score = Score(-10, -10);
const SEMI_OPEN_FILE: Score = Score(0, 0);
const SEMI_OPEN_FILE_ADJ_ENEMY_KING: Score = Score(10, 0);
const SEMI_OPEN_FILE_SAME_ENEMY_KING: Score = Score(20, 0);
const OPEN_FILE: Score = Score(10, 10);
const OPEN_FILE_ADJ_ENEMY_KING: Score = Score(20, 10);
const OPEN_FILE_SAME_ENEMY_KING: Score = Score(30, 10);

const SEVENTH_RANK_ROOK: Score = Score(20, 40);
const SEVENTH_RANK_QUEEN: Score = Score(10, 20);

const SHELTER_FLOOR: Value = -11;
const STORM_WEIGHTS: [Value; 3] = [60, 30, 10];
const ATTACKER_WEIGHT: [i32; PIECE_TYPE_CNT] = [0, 0, 20, 20, 40, 80, 0, 0];
const ATTACK_UNITS: [i32; 8] = [0, 0, 50, 75, 88, 94, 97, 99];

/// `rank_bonus[d]` for a passed pawn `d` ranks ahead of its own back rank, `d` clamped
/// to `[0, 6]`.
const PASSED_RANK_BONUS: [f32; 7] = [0.0, 0.0, 0.0, 0.1, 0.3, 0.6, 1.0];

/// Bonus for the side to move, tapered like every other term rather than added flat
/// after blending.
const TEMPO: Score = Score(20, 10);

pub struct Eval;

impl Eval {
    /// Returns the evaluation of `pos` from the perspective of the side to move.
    pub fn eval(pos: &Position) -> Value {
        let h = Helper::new();
        let phase = game_phase(pos);

        let white_attacks = attack_map(pos, Player::White);
        let black_attacks = attack_map(pos, Player::Black);

        let mut score = Score::ZERO;
        score += materials(pos);
        score += pawn_structure(pos, &h);
        score += mobility(pos, &h);
        score += file_control(pos, &h);
        score += seventh_rank(pos);
        score += king_safety(pos, &h);
        score += passed_pawns(pos, &h, white_attacks, black_attacks);

        let side_to_move: i16 = match pos.turn() {
            Player::White => 1,
            Player::Black => -1,
        };
        score += TEMPO * side_to_move;

        let white_relative = score.taper(phase);
        match pos.turn() {
            Player::White => white_relative,
            Player::Black => -white_relative,
        }
    }
}

/// `0` at the start of the game, `256` once all heavy material is gone.
fn game_phase(pos: &Position) -> i32 {
    let mut remaining = 24;
    for &player in &[Player::White, Player::Black] {
        remaining -= 4 * pos.piece_bb(player, PieceType::Q).count_bits() as i32;
        remaining -= 2 * pos.piece_bb(player, PieceType::R).count_bits() as i32;
        remaining -= (pos.piece_bb(player, PieceType::B).count_bits()
            + pos.piece_bb(player, PieceType::N).count_bits()) as i32;
    }
    let remaining = remaining.max(0);
    ((24 - remaining) * 256) / 24
}

fn materials(pos: &Position) -> Score {
    let mut score = Score::ZERO;
    for &(piece_type, weight) in &[
        (PieceType::P, PAWN_MATERIAL),
        (PieceType::N, KNIGHT_MATERIAL),
        (PieceType::B, BISHOP_MATERIAL),
        (PieceType::R, ROOK_MATERIAL),
        (PieceType::Q, QUEEN_MATERIAL),
    ] {
        let white = pos.piece_bb(Player::White, piece_type).count_bits() as i16;
        let black = pos.piece_bb(Player::Black, piece_type).count_bits() as i16;
        score += weight * (white - black);
    }
    if has_bishop_pair(pos, Player::White) {
        score += BISHOP_PAIR;
    }
    if has_bishop_pair(pos, Player::Black) {
        score -= BISHOP_PAIR;
    }
    score
}

fn has_bishop_pair(pos: &Position, player: Player) -> bool {
    let bishops = pos.piece_bb(player, PieceType::B);
    (bishops & LIGHT_SQUARES_BB).is_not_empty() && (bishops & DARK_SQUARES_BB).is_not_empty()
}

const LIGHT_SQUARES_BB: crate::core::bitboard::BitBoard =
    crate::core::bitboard::BitBoard(0x55AA_55AA_55AA_55AA);
const DARK_SQUARES_BB: crate::core::bitboard::BitBoard =
    crate::core::bitboard::BitBoard(0xAA55_AA55_AA55_AA55);

fn pawn_structure(pos: &Position, h: &Helper) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let pawns = pos.piece_bb(player, PieceType::P);
        let enemy_pawns = pos.piece_bb(player.other_player(), PieceType::P);
        for &file in ALL_FILES.iter() {
            let file_bb = crate::core::bitboard::BitBoard::FILE_A << (file as usize);
            let own_on_file = (pawns & file_bb).count_bits();
            if own_on_file > 1 {
                score += DOUBLED_PAWN * (sign * (own_on_file as i16 - 1));
            }
            if own_on_file == 0 {
                continue;
            }
            let neighbors = h.adjacent_file(file);
            let isolated = (pawns & neighbors).is_empty();
            let open = (enemy_pawns & file_bb).is_empty();
            if isolated {
                score += if open { ISOLATED_OPEN_PAWN } else { ISOLATED_PAWN } * sign;
            } else if is_backward(pos, h, player, file, pawns, enemy_pawns) {
                score += if open { BACKWARD_OPEN_PAWN } else { BACKWARD_PAWN } * sign;
            }
        }
    }
    score
}

/// A pawn is backward when it has no pawn behind it on an adjacent file to defend its
/// advance, and the square ahead of it is controlled by an enemy pawn.
fn is_backward(
    pos: &Position,
    h: &Helper,
    player: Player,
    file: File,
    pawns: crate::core::bitboard::BitBoard,
    _enemy_pawns: crate::core::bitboard::BitBoard,
) -> bool {
    let file_bb = crate::core::bitboard::BitBoard::FILE_A << (file as usize);
    let own_on_file = pawns & file_bb;
    let rearmost = own_on_file.backmost_sq(player);
    let neighbors = h.adjacent_file(file);
    let supporters_behind = h.forward_file_bb(player.other_player(), rearmost) & neighbors & pawns;
    if supporters_behind.is_not_empty() {
        return false;
    }
    let stop_attackers = h.pawn_attacks_from(rearmost, player) & pos.piece_bb(player.other_player(), PieceType::P);
    stop_attackers.is_not_empty()
}

fn mobility(pos: &Position, h: &Helper) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let own = pos.occupied_co(player);
        let occ = pos.occupied();

        let mut knights = pos.piece_bb(player, PieceType::N);
        let mut knight_net = 0i32;
        while let Some(sq) = knights.pop_some_lsb() {
            knight_net += (h.knight_moves(sq) & !own).count_bits() as i32 - KNIGHT_MOBILITY_BASE;
        }

        let mut bishops = pos.piece_bb(player, PieceType::B);
        let mut bishop_net = 0i32;
        while let Some(sq) = bishops.pop_some_lsb() {
            bishop_net += (h.bishop_moves(occ, sq) & !own).count_bits() as i32 - BISHOP_MOBILITY_BASE;
        }

        let mut rooks = pos.piece_bb(player, PieceType::R);
        let mut rook_net = 0i32;
        while let Some(sq) = rooks.pop_some_lsb() {
            rook_net += (h.rook_moves(occ, sq) & !own).count_bits() as i32 - ROOK_MOBILITY_BASE;
        }

        score += KNIGHT_MOBILITY_WEIGHT * (sign * knight_net as i16);
        score += BISHOP_MOBILITY_WEIGHT * (sign * bishop_net as i16);
        score += ROOK_MOBILITY_WEIGHT * (sign * rook_net as i16);
    }
    score
}

fn file_control(pos: &Position, _h: &Helper) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let own_pawns = pos.piece_bb(player, PieceType::P);
        let enemy_pawns = pos.piece_bb(player.other_player(), PieceType::P);
        let enemy_king_file = pos.king_sq(player.other_player()).file();
        for &rf in &[PieceType::R, PieceType::Q] {
            let mut pieces = pos.piece_bb(player, rf);
            while let Some(sq) = pieces.pop_some_lsb() {
                let file = sq.file();
                let file_bb = crate::core::bitboard::BitBoard::FILE_A << (file as usize);
                if (own_pawns & file_bb).is_not_empty() {
                    score += CLOSED_FILE * sign;
                    continue;
                }

                let adj_enemy_king = (file as i32 - enemy_king_file as i32).abs() == 1;
                let same_enemy_king = file == enemy_king_file;
                let semi_open = (enemy_pawns & file_bb).is_not_empty();

                if semi_open {
                    score += SEMI_OPEN_FILE * sign;
                    if adj_enemy_king {
                        score += SEMI_OPEN_FILE_ADJ_ENEMY_KING * sign;
                    }
                    if same_enemy_king {
                        score += SEMI_OPEN_FILE_SAME_ENEMY_KING * sign;
                    }
                } else {
                    score += OPEN_FILE * sign;
                    if adj_enemy_king {
                        score += OPEN_FILE_ADJ_ENEMY_KING * sign;
                    }
                    if same_enemy_king {
                        score += OPEN_FILE_SAME_ENEMY_KING * sign;
                    }
                }
            }
        }
    }
    score
}

fn seventh_rank(pos: &Position) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let seventh = match player {
            Player::White => Rank::R7,
            Player::Black => Rank::R2,
        };
        let enemy_pawns_on_rank =
            (pos.piece_bb(player.other_player(), PieceType::P) & rank_bb(seventh)).is_not_empty();
        if !enemy_pawns_on_rank {
            continue;
        }
        if (pos.piece_bb(player, PieceType::R) & rank_bb(seventh)).is_not_empty() {
            score += SEVENTH_RANK_ROOK * sign;
        }
        if (pos.piece_bb(player, PieceType::Q) & rank_bb(seventh)).is_not_empty() {
            score += SEVENTH_RANK_QUEEN * sign;
        }
    }
    score
}

fn rank_bb(rank: Rank) -> crate::core::bitboard::BitBoard {
    crate::core::bitboard::BitBoard::RANK_1 << ((rank as usize) * 8)
}

/// The union of every pseudo-attack a side's pieces make, used for passed-pawn "free
/// advance" scoring.
fn attack_map(pos: &Position, player: Player) -> crate::core::bitboard::BitBoard {
    let h = Helper::new();
    let occ = pos.occupied();
    let mut attacks = crate::core::bitboard::BitBoard(0);
    let mut pawns = pos.piece_bb(player, PieceType::P);
    while let Some(sq) = pawns.pop_some_lsb() {
        attacks |= h.pawn_attacks_from(sq, player);
    }
    let mut knights = pos.piece_bb(player, PieceType::N);
    while let Some(sq) = knights.pop_some_lsb() {
        attacks |= h.knight_moves(sq);
    }
    let mut bishops = pos.piece_bb(player, PieceType::B) | pos.piece_bb(player, PieceType::Q);
    while let Some(sq) = bishops.pop_some_lsb() {
        attacks |= h.bishop_moves(occ, sq);
    }
    let mut rooks = pos.piece_bb(player, PieceType::R) | pos.piece_bb(player, PieceType::Q);
    while let Some(sq) = rooks.pop_some_lsb() {
        attacks |= h.rook_moves(occ, sq);
    }
    attacks |= h.king_moves(pos.king_sq(player));
    attacks
}

fn king_safety(pos: &Position, h: &Helper) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let king_sq = pos.king_sq(player);
        let king_file = king_sq.file();

        let shelter = pawn_shelter_penalty(pos, h, player, king_sq);
        score += Score(shelter, 0) * sign;

        let storm = pawn_storm_penalty(pos, player, king_file);
        score += Score(storm, 0) * sign;

        let attacker_score = attacker_pressure(pos, h, player.other_player(), king_sq);
        score -= Score(attacker_score as Value, 0) * sign;
    }
    score
}

fn pawn_shelter_penalty(pos: &Position, h: &Helper, player: Player, king_sq: crate::core::sq::SQ) -> Value {
    let king_file = king_sq.file();
    let own_pawns = pos.piece_bb(player, PieceType::P);
    let mut penalty: i32 = 0;
    let mut any_shelter = false;
    for &file in &[king_file] {
        let neighbors = h.adjacent_file(file) | (crate::core::bitboard::BitBoard::FILE_A << (file as usize));
        let shelter_pawns = own_pawns & neighbors;
        if shelter_pawns.is_not_empty() {
            any_shelter = true;
            let mut bb = shelter_pawns;
            while let Some(sq) = bb.pop_some_lsb() {
                let dist = (player.relative_rank_of_sq(sq) as i32 - player.relative_rank_of_sq(king_sq) as i32).abs();
                let on_king_file = sq.file() == king_file;
                let weight = if on_king_file { 2 } else { 1 };
                penalty += dist * weight;
            }
        }
    }
    if !any_shelter {
        return SHELTER_FLOOR;
    }
    (-penalty).max(SHELTER_FLOOR as i32) as Value
}

fn pawn_storm_penalty(pos: &Position, player: Player, king_file: File) -> Value {
    let enemy_pawns = pos.piece_bb(player.other_player(), PieceType::P);
    let mut penalty: i32 = 0;
    for df in -1i32..=1 {
        let file_idx = king_file as i32 + df;
        if !(0..8).contains(&file_idx) {
            continue;
        }
        let file_bb = crate::core::bitboard::BitBoard::FILE_A << (file_idx as usize);
        let mut bb = enemy_pawns & file_bb;
        while let Some(sq) = bb.pop_some_lsb() {
            let storm_rank = player.other_player().relative_rank_of_sq(sq) as i32;
            if (2..=4).contains(&storm_rank) {
                penalty += STORM_WEIGHTS[(storm_rank - 2) as usize] as i32;
            }
        }
    }
    -(penalty as Value)
}

/// Weighted count of `attacker`'s pieces attacking the 8 squares around `king_sq`,
/// scaled down as the attacker count grows (a lone attacker rarely mates).
fn attacker_pressure(pos: &Position, h: &Helper, attacker: Player, king_sq: crate::core::sq::SQ) -> i32 {
    let ring = h.king_moves(king_sq);
    let occ = pos.occupied();
    let mut units = 0i32;
    let mut attacker_count = 0usize;

    let mut knights = pos.piece_bb(attacker, PieceType::N);
    while let Some(sq) = knights.pop_some_lsb() {
        if (h.knight_moves(sq) & ring).is_not_empty() {
            units += ATTACKER_WEIGHT[PieceType::N as usize];
            attacker_count += 1;
        }
    }
    let mut bishops = pos.piece_bb(attacker, PieceType::B);
    while let Some(sq) = bishops.pop_some_lsb() {
        if (h.bishop_moves(occ, sq) & ring).is_not_empty() {
            units += ATTACKER_WEIGHT[PieceType::B as usize];
            attacker_count += 1;
        }
    }
    let mut rooks = pos.piece_bb(attacker, PieceType::R);
    while let Some(sq) = rooks.pop_some_lsb() {
        if (h.rook_moves(occ, sq) & ring).is_not_empty() {
            units += ATTACKER_WEIGHT[PieceType::R as usize];
            attacker_count += 1;
        }
    }
    let mut queens = pos.piece_bb(attacker, PieceType::Q);
    while let Some(sq) = queens.pop_some_lsb() {
        let attacks = h.bishop_moves(occ, sq) | h.rook_moves(occ, sq);
        if (attacks & ring).is_not_empty() {
            units += ATTACKER_WEIGHT[PieceType::Q as usize];
            attacker_count += 1;
        }
    }

    let idx = attacker_count.min(7);
    (units * ATTACK_UNITS[idx]) / 100
}

fn passed_pawns(
    pos: &Position,
    h: &Helper,
    white_attacks: crate::core::bitboard::BitBoard,
    black_attacks: crate::core::bitboard::BitBoard,
) -> Score {
    let mut score = Score::ZERO;
    for &player in &[Player::White, Player::Black] {
        let sign: i16 = if player == Player::White { 1 } else { -1 };
        let enemy_attacks = if player == Player::White { black_attacks } else { white_attacks };
        let mut pawns = pos.piece_bb(player, PieceType::P);
        while let Some(sq) = pawns.pop_some_lsb() {
            let mask = h.passed_pawn_mask(player, sq);
            if (mask & pos.piece_bb(player.other_player(), PieceType::P)).is_not_empty() {
                continue;
            }
            let dist = player.relative_rank_of_sq(sq) as usize;
            let rank_bonus = PASSED_RANK_BONUS[dist.min(6)];

            let push_sq = crate::core::sq::SQ((sq.0 as i16 + player.pawn_push() as i16) as u8);
            let push_empty = (push_sq.to_bb() & pos.occupied()).is_empty();
            let push_attacked = (push_sq.to_bb() & enemy_attacks).is_not_empty();
            let free_advance = if push_empty && !push_attacked { 60.0 } else { 0.0 };

            let mg = 10.0 + 60.0 * rank_bonus;
            let eg = 20.0 + (120.0 + free_advance) * rank_bonus;
            score += Score(mg as Value, eg as Value) * sign;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn start_position_is_roughly_balanced() {
        let pos = Position::start_pos();
        let score = Eval::eval(&pos);
        assert!(score.abs() < 50, "expected near-zero eval, got {}", score);
    }

    #[test]
    fn start_position_is_exactly_the_tempo_bonus() {
        // The start position is fully symmetric, so every term cancels except the
        // tapered tempo bonus for the side to move (phase 0 => Score(20, 10).taper(0) == 20).
        let pos = Position::start_pos();
        assert_eq!(Eval::eval(&pos), 20);
    }

    #[test]
    fn extra_queen_is_winning_for_white() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(Eval::eval(&pos) > 500);
    }

    #[test]
    fn extra_queen_is_losing_for_black_to_move() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert!(Eval::eval(&pos) < -500);
    }
}
