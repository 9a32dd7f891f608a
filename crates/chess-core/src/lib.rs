//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules
//! engine:
//! - [`PieceKind`] and [`Color`] for piece representation, with the
//!   per-kind movement-offset tables
//! - [`Square`], [`File`], and [`Rank`] for board coordinates and
//!   algebraic notation

mod color;
mod piece;
mod square;

pub use color::Color;
pub use piece::{
    Piece, PieceKind, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS,
    ROOK_DIRECTIONS,
};
pub use square::{File, NotationError, Rank, Square};
