//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - an 8x8 cell grid owning piece placement and the
//!   en-passant window
//! - [`Game`] - turn orchestration: move legality, captures, castling,
//!   en passant, promotion, and the check/checkmate/stalemate queries
//! - [`GameSnapshot`] - a versioned, explicitly validated document for
//!   persisting a game and restoring it later
//! - Destination-set and attack computation over movement templates
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, GameStatus};
//!
//! let mut game = Game::new("alice", "bob");
//! game.make_play("e2", "e4").unwrap();
//! game.make_play("e7", "e5").unwrap();
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

mod board;
mod game;
pub mod movegen;
pub mod path;
mod snapshot;

pub use board::{Board, EnPassant};
pub use game::{Game, GameStatus, PlayError, Player};
pub use snapshot::{
    CellSnapshot, EnPassantSnapshot, GameSnapshot, PlayerSnapshot, SnapshotError, FORMAT_VERSION,
};
