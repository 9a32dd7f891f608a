//! Destination-set generation and attack computation.
//!
//! Destination sets are pseudo-legal: offsets applied from the piece's
//! movement template and filtered to the board, with pawn conditions
//! (empty forward cells, enemy or en-passant diagonals) baked in.
//! Obstruction filtering happens separately, so slider destination sets
//! include blocked squares until [`legal_targets`] trims them.

use crate::board::Board;
use crate::path::squares_between;
use chess_core::{Color, Piece, PieceKind, Square};
use std::collections::HashSet;

/// Computes the pseudo-legal destination set for the piece at `from`.
///
/// Returns the empty set when the square is vacant. Destinations are
/// bounds-filtered but not obstruction-filtered, except for pawns,
/// whose forward and capture conditions are part of the template.
pub fn destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece),
        PieceKind::Knight | PieceKind::King => piece
            .kind
            .step_offsets()
            .iter()
            .filter_map(|&(drow, dcol)| from.offset(drow, dcol))
            .collect(),
        _ => {
            let mut out = Vec::new();
            for &(drow, dcol) in piece.kind.ray_directions() {
                let mut current = from;
                while let Some(next) = current.offset(drow, dcol) {
                    out.push(next);
                    current = next;
                }
            }
            out
        }
    }
}

fn pawn_destinations(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    let dir = piece.color.pawn_direction();
    let mut out = Vec::new();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            out.push(one);
            let (row, _) = from.coordinate();
            if row == piece.color.pawn_start_rank() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for dcol in [-1, 1] {
        let Some(diag) = from.offset(dir, dcol) else {
            continue;
        };
        let capturable = match board.piece_at(diag) {
            Some(target) => target.color != piece.color,
            None => board.en_passant().is_some_and(|window| {
                window.capture == diag
                    && board
                        .piece_at(window.pawn)
                        .is_some_and(|pawn| pawn.color != piece.color)
            }),
        };
        if capturable {
            out.push(diag);
        }
    }

    out
}

/// Computes the destination set filtered by obstruction and friendly
/// occupancy: the moves the piece at `from` could actually play, before
/// self-check verification.
pub fn legal_targets(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    destinations(board, from)
        .into_iter()
        .filter(|&to| {
            if board
                .piece_at(to)
                .is_some_and(|target| target.color == piece.color)
            {
                return false;
            }
            if piece.kind == PieceKind::Knight {
                return true;
            }
            match squares_between(from, to) {
                Some(between) => between.iter().all(|&sq| board.is_empty(sq)),
                None => true,
            }
        })
        .collect()
}

/// Computes the squares attacked by a single piece.
///
/// Pawns attack their two forward diagonals regardless of occupancy.
/// Slider rays stop at the first occupied square, inclusive, except
/// that the opposing king does not block the walk: squares behind a
/// checked king along the attack line stay attacked, so the king cannot
/// retreat one step further down the same line.
pub fn piece_attacks(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_direction();
            [-1, 1]
                .iter()
                .filter_map(|&dcol| from.offset(dir, dcol))
                .collect()
        }
        PieceKind::Knight | PieceKind::King => piece
            .kind
            .step_offsets()
            .iter()
            .filter_map(|&(drow, dcol)| from.offset(drow, dcol))
            .collect(),
        _ => {
            let mut out = Vec::new();
            for &(drow, dcol) in piece.kind.ray_directions() {
                let mut current = from;
                while let Some(next) = current.offset(drow, dcol) {
                    out.push(next);
                    current = next;
                    if let Some(occupant) = board.piece_at(next) {
                        let transparent_king =
                            occupant.kind == PieceKind::King && occupant.color != piece.color;
                        if !transparent_king {
                            break;
                        }
                    }
                }
            }
            out
        }
    }
}

/// Computes the full set of squares attacked by one color.
pub fn attacked_squares(board: &Board, color: Color) -> HashSet<Square> {
    let mut attacked = HashSet::new();
    for (from, piece) in board.pieces_of(color) {
        attacked.extend(piece_attacks(board, from, piece));
    }
    attacked
}

/// Returns true if `square` is attacked by any piece of `by`.
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| piece_attacks(board, from, piece).contains(&square))
}

/// Returns the squares of every `by` piece currently attacking `target`.
pub fn attackers_of(board: &Board, target: Square, by: Color) -> Vec<Square> {
    board
        .pieces_of(by)
        .filter(|&(from, piece)| piece_attacks(board, from, piece).contains(&target))
        .map(|(from, _)| from)
        .collect()
}

/// Returns true if the king of `color` stands on an attacked square.
///
/// # Panics
/// Panics if the board holds no king of that color; check computation
/// has no defined behavior on such a board, so continuing would operate
/// on corrupted state.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let king = board
        .find_king(color)
        .unwrap_or_else(|| panic!("no {} king on the board", color));
    is_attacked(board, king, color.opposite())
}
